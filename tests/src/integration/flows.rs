//! # Multi-Bridge Flows
//!
//! A container and its sub-apps, each with its own bridge on its own
//! in-memory context, exchanging real messages:
//!
//! 1. **Update → ACK**: the sub-app answers from inside its handler
//! 2. **Sealed + signed**: same secret on both sides, then mismatched secrets
//! 3. **Runtime reconfiguration**: allowlist and frame list changes
//! 4. **Tabs**: container → tab via send function, tab → container via opener

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{config, spy_handler, SpyWindow};
    use fb_02_bridge::{
        Bridge, BridgeRole, BrowsingContext, ContextUpdate, PeerContexts, PeerWindow,
    };
    use serde_json::{json, Value};
    use shared_types::{AckPayload, MessageKind};
    use std::sync::{Arc, Weak};

    const HOST: &str = "https://host.test";
    const APP: &str = "https://app.test";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Pair {
        host_ctx: Arc<BrowsingContext>,
        app_ctx: Arc<BrowsingContext>,
        container: Arc<Bridge>,
        app: Arc<Bridge>,
    }

    /// Container at HOST with one frame at APP, both trusting each other.
    fn pair(secret_host: Option<&str>, secret_app: Option<&str>, signed: bool) -> Pair {
        let host_ctx = BrowsingContext::new(HOST);
        let app_ctx = BrowsingContext::new(APP);

        let container = Arc::new(
            Bridge::new(
                config(BridgeRole::Container, &[APP], secret_host, signed),
                PeerContexts::new().with_frame(app_ctx.window_from(HOST)),
                host_ctx.clone(),
            )
            .unwrap(),
        );
        let app = Arc::new(
            Bridge::new(
                config(BridgeRole::SubApp, &[HOST], secret_app, signed),
                PeerContexts::new().with_parent(host_ctx.window_from(APP)),
                app_ctx.clone(),
            )
            .unwrap(),
        );

        Pair {
            host_ctx,
            app_ctx,
            container,
            app,
        }
    }

    /// Make `app` acknowledge every THEME_UPDATE from inside the handler.
    fn acknowledge_themes(app: &Arc<Bridge>) {
        let weak: Weak<Bridge> = Arc::downgrade(app);
        app.register_handler(MessageKind::ThemeUpdate, move |_payload| {
            if let Some(app) = weak.upgrade() {
                app.send(
                    MessageKind::ThemeUpdateAck,
                    serde_json::to_value(AckPayload::ok()).unwrap(),
                );
            }
        });
    }

    // =============================================================================
    // UPDATE → ACK
    // =============================================================================

    #[test]
    fn test_theme_update_is_acknowledged() {
        let p = pair(None, None, false);
        acknowledge_themes(&p.app);
        let acks = spy_handler(&p.container, "THEME_UPDATE_ACK");

        let report = p.container.send(MessageKind::ThemeUpdate, json!({"theme": "dark"}));

        assert_eq!(report.delivered, 1);
        assert_eq!(*acks.lock(), vec![json!({"success": true})]);
        assert_eq!(p.app.metrics().handled, 1);
        assert_eq!(p.app.metrics().sent, 1);
    }

    #[test]
    fn test_subapp_ignores_frame_list() {
        let p = pair(None, None, false);
        let seen = SpyWindow::named("spy");
        p.app
            .update_context(ContextUpdate::Frames(vec![seen.clone() as Arc<dyn PeerWindow>]));
        let pings = spy_handler(&p.container, "PING");
        p.app.send("PING", json!(1));

        assert_eq!(pings.lock().len(), 1);
        assert!(seen.posts.lock().is_empty());
    }

    // =============================================================================
    // SEALED AND SIGNED
    // =============================================================================

    #[test]
    fn test_sealed_signed_exchange() {
        let p = pair(Some("shared"), Some("shared"), true);
        acknowledge_themes(&p.app);
        let acks = spy_handler(&p.container, "THEME_UPDATE_ACK");

        p.container.send(MessageKind::ThemeUpdate, json!({"theme": "light"}));

        assert_eq!(acks.lock().len(), 1);
        assert_eq!(p.app.metrics().signature_rejected, 0);
        assert_eq!(p.container.metrics().signature_rejected, 0);
    }

    #[test]
    fn test_mismatched_secrets_fail_to_decode() {
        let p = pair(Some("k1"), Some("k2"), false);
        let calls = spy_handler(&p.app, "THEME_UPDATE");

        let report = p.container.send(MessageKind::ThemeUpdate, json!({"theme": "dark"}));

        assert_eq!(report.delivered, 1);
        assert!(calls.lock().is_empty());
        assert_eq!(p.app.metrics().decode_failures, 1);
    }

    #[test]
    fn test_unsigned_sender_rejected_when_signature_required() {
        let host_ctx = BrowsingContext::new(HOST);
        let app_ctx = BrowsingContext::new(APP);
        let container = Bridge::new(
            config(BridgeRole::Container, &[APP], Some("k1"), false),
            PeerContexts::new().with_frame(app_ctx.window_from(HOST)),
            host_ctx.clone(),
        )
        .unwrap();
        let app = Bridge::new(
            config(BridgeRole::SubApp, &[HOST], Some("k1"), true),
            PeerContexts::new().with_parent(host_ctx.window_from(APP)),
            app_ctx.clone(),
        )
        .unwrap();
        let calls = spy_handler(&app, "X");

        container.send("X", json!(1));

        assert!(calls.lock().is_empty());
        assert_eq!(app.metrics().signature_rejected, 1);
    }

    // =============================================================================
    // RUNTIME RECONFIGURATION
    // =============================================================================

    #[test]
    fn test_clearing_origins_stops_inbound() {
        let p = pair(None, None, false);
        let calls = spy_handler(&p.container, "PING");

        p.container.clear_allowed_origins();
        p.app.send("PING", json!(1));
        assert!(calls.lock().is_empty());

        p.container.add_allowed_origin(APP);
        p.app.send("PING", json!(2));
        assert_eq!(*calls.lock(), vec![json!(2)]);
    }

    #[test]
    fn test_frame_list_replacement() {
        let p = pair(None, None, false);
        let app_calls = spy_handler(&p.app, "EVT");
        let replacement = SpyWindow::named("replacement");

        p.container
            .update_context(ContextUpdate::Frames(vec![replacement.clone() as Arc<dyn PeerWindow>]));
        p.container.send("EVT", json!({}));

        assert!(app_calls.lock().is_empty());
        assert_eq!(replacement.posts.lock().len(), 1);
    }

    #[test]
    fn test_wrong_target_origin_is_discarded_by_host() {
        let p = pair(None, None, false);
        let calls = spy_handler(&p.container, "PING");

        let report = p.app.send_with_target("PING", json!(1), "https://elsewhere.test");

        assert_eq!(report.delivered, 1);
        assert!(calls.lock().is_empty());
    }

    #[test]
    fn test_panicking_handler_does_not_stop_later_messages() {
        let p = pair(None, None, false);
        p.container.register_handler("BOOM", |_: &Value| panic!("handler bug"));
        let calls = spy_handler(&p.container, "PING");

        p.app.send("BOOM", json!(null));
        p.app.send("PING", json!(1));

        assert_eq!(calls.lock().len(), 1);
        assert_eq!(p.container.metrics().handler_panics, 1);
    }

    #[test]
    fn test_closed_frame_reported_without_error() {
        let p = pair(None, None, false);
        p.app_ctx.close();

        let report = p.container.send("EVT", json!({}));

        assert_eq!(report.failed, 1);
        assert_eq!(p.container.metrics().dispatch_failures, 1);
    }

    // =============================================================================
    // TABS
    // =============================================================================

    #[test]
    fn test_tab_round_trip_via_opener() {
        let host_ctx = BrowsingContext::new(HOST);
        let tab_ctx = BrowsingContext::new("https://tab.test");

        let container = Bridge::new(
            config(BridgeRole::Container, &["https://tab.test"], None, false),
            PeerContexts::new().with_tab("tab-1", tab_ctx.tab_sender(HOST)),
            host_ctx.clone(),
        )
        .unwrap();
        let tab = Arc::new(
            Bridge::new(
                config(BridgeRole::SubApp, &[HOST], None, false),
                PeerContexts::new()
                    .with_opener(host_ctx.window_from("https://tab.test"))
                    .with_parent(SpyWindow::named("unused-parent")),
                tab_ctx.clone(),
            )
            .unwrap(),
        );
        acknowledge_themes(&tab);
        let acks = spy_handler(&container, "THEME_UPDATE_ACK");

        container.send(MessageKind::ThemeUpdate, json!({"theme": "dark"}));

        assert_eq!(acks.lock().len(), 1);
    }
}
