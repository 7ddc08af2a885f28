//! Outbound routing policy
//!
//! `dispatch_plan` is the single table that turns a role and the current
//! peer contexts into an ordered list of `(peer, target origin)` pairs:
//!
//! | role        | peers                                   | target origin              |
//! |-------------|-----------------------------------------|----------------------------|
//! | `Container` | every frame, then every tab             | override or `"*"`; none for tabs |
//! | `SubApp`    | opener if present, else parent          | override or first allowed origin |
//!
//! An empty plan means there is nobody to send to.

use crate::domain::config::BridgeRole;
use crate::ports::{PeerWindow, TabSender};
use shared_types::DispatchError;
use std::fmt;
use std::sync::Arc;

/// Target origin a container uses for frames when no override is given.
pub const ANY_ORIGIN: &str = "*";

/// Live handles to the contexts this bridge can reach.
#[derive(Clone, Default)]
pub struct PeerContexts {
    /// Embedded frames, in document order.
    pub frames: Vec<Arc<dyn PeerWindow>>,
    /// Popup tabs by id, in registration order. Ids are unique.
    pub tabs: Vec<(String, Arc<dyn TabSender>)>,
    /// Window that opened this one.
    pub opener: Option<Arc<dyn PeerWindow>>,
    /// Embedding parent window.
    pub parent: Option<Arc<dyn PeerWindow>>,
}

impl PeerContexts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame(mut self, frame: Arc<dyn PeerWindow>) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn with_tab(mut self, id: impl Into<String>, sender: Arc<dyn TabSender>) -> Self {
        self.insert_tab(id.into(), sender);
        self
    }

    pub fn with_opener(mut self, opener: Arc<dyn PeerWindow>) -> Self {
        self.opener = Some(opener);
        self
    }

    pub fn with_parent(mut self, parent: Arc<dyn PeerWindow>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add a tab; an existing id keeps its position and gets the new sender.
    pub fn insert_tab(&mut self, id: String, sender: Arc<dyn TabSender>) {
        match self.tabs.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = sender,
            None => self.tabs.push((id, sender)),
        }
    }

    /// Replace the selected set wholesale.
    pub fn apply(&mut self, update: ContextUpdate) {
        match update {
            ContextUpdate::Frames(frames) => self.frames = frames,
            ContextUpdate::Tabs(tabs) => {
                self.tabs.clear();
                for (id, sender) in tabs {
                    self.insert_tab(id, sender);
                }
            }
        }
    }
}

impl fmt::Debug for PeerContexts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frames: Vec<String> = self.frames.iter().map(|w| w.describe()).collect();
        let tabs: Vec<&str> = self.tabs.iter().map(|(id, _)| id.as_str()).collect();
        f.debug_struct("PeerContexts")
            .field("frames", &frames)
            .field("tabs", &tabs)
            .field("opener", &self.opener.as_ref().map(|w| w.describe()))
            .field("parent", &self.parent.as_ref().map(|w| w.describe()))
            .finish()
    }
}

/// Replacement for one peer set. Never merged with the previous set.
pub enum ContextUpdate {
    Frames(Vec<Arc<dyn PeerWindow>>),
    Tabs(Vec<(String, Arc<dyn TabSender>)>),
}

impl fmt::Debug for ContextUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextUpdate::Frames(frames) => write!(f, "Frames({})", frames.len()),
            ContextUpdate::Tabs(tabs) => write!(f, "Tabs({})", tabs.len()),
        }
    }
}

/// One reachable peer.
#[derive(Clone)]
pub enum PeerHandle {
    Frame {
        index: usize,
        window: Arc<dyn PeerWindow>,
    },
    Tab {
        id: String,
        sender: Arc<dyn TabSender>,
    },
    Opener(Arc<dyn PeerWindow>),
    Parent(Arc<dyn PeerWindow>),
}

/// A peer paired with the target origin it is posted under.
#[derive(Clone)]
pub struct DispatchTarget {
    pub peer: PeerHandle,
    /// `None` only for tabs, whose send functions take no target origin.
    pub target_origin: Option<String>,
}

impl DispatchTarget {
    /// Hand `data` to the peer.
    pub fn dispatch(&self, data: &str) -> Result<(), DispatchError> {
        let target = self.target_origin.as_deref().unwrap_or(ANY_ORIGIN);
        match &self.peer {
            PeerHandle::Frame { window, .. } => window.post_message(data, target),
            PeerHandle::Tab { id, sender } => sender.send(id, data),
            PeerHandle::Opener(window) | PeerHandle::Parent(window) => {
                window.post_message(data, target)
            }
        }
    }

    /// Label for logs, e.g. `frame[0]`, `tab:t1`, `opener`.
    pub fn label(&self) -> String {
        match &self.peer {
            PeerHandle::Frame { index, .. } => format!("frame[{index}]"),
            PeerHandle::Tab { id, .. } => format!("tab:{id}"),
            PeerHandle::Opener(_) => "opener".to_string(),
            PeerHandle::Parent(_) => "parent".to_string(),
        }
    }
}

impl fmt::Debug for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTarget")
            .field("peer", &self.label())
            .field("target_origin", &self.target_origin)
            .finish()
    }
}

/// Compute the ordered fan-out for one outbound message.
pub fn dispatch_plan(
    role: BridgeRole,
    contexts: &PeerContexts,
    allowed_origins: &[String],
    target_override: Option<&str>,
) -> Vec<DispatchTarget> {
    match role {
        BridgeRole::Container => {
            let frame_origin = target_override.unwrap_or(ANY_ORIGIN);
            let frames = contexts
                .frames
                .iter()
                .enumerate()
                .map(|(index, window)| DispatchTarget {
                    peer: PeerHandle::Frame {
                        index,
                        window: Arc::clone(window),
                    },
                    target_origin: Some(frame_origin.to_string()),
                });
            let tabs = contexts.tabs.iter().map(|(id, sender)| DispatchTarget {
                peer: PeerHandle::Tab {
                    id: id.clone(),
                    sender: Arc::clone(sender),
                },
                target_origin: None,
            });
            frames.chain(tabs).collect()
        }
        BridgeRole::SubApp => {
            let peer = match (&contexts.opener, &contexts.parent) {
                (Some(opener), _) => PeerHandle::Opener(Arc::clone(opener)),
                (None, Some(parent)) => PeerHandle::Parent(Arc::clone(parent)),
                (None, None) => return Vec::new(),
            };
            let target_origin = match target_override {
                Some(origin) => origin.to_string(),
                None => match allowed_origins.first() {
                    Some(origin) => origin.clone(),
                    None => return Vec::new(),
                },
            };
            vec![DispatchTarget {
                peer,
                target_origin: Some(target_origin),
            }]
        }
    }
}
