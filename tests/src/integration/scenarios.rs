//! # Bridge Scenarios
//!
//! Origin gate, codec round trip, fan-out, sub-app routing, handler
//! replacement and teardown, each against a real bridge on an in-memory
//! context.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{container_on, spy_handler, SpyTab, SpyWindow};
    use fb_01_communicator::{CodecError, Communicator, MessageCodec};
    use fb_02_bridge::{
        Bridge, BridgeConfigBuilder, BridgeRole, BrowsingContext, MessageEvent, PeerContexts,
        PeerWindow, TabSender,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use shared_types::BridgeMessage;
    use std::sync::Arc;

    // =============================================================================
    // ORIGIN GATE
    // =============================================================================

    #[test]
    fn test_foreign_origin_never_reaches_handler() {
        let (bridge, host) = container_on("https://host.test", &["https://a.test"], PeerContexts::new());
        let calls = spy_handler(&bridge, "PING");

        host.deliver(&MessageEvent::new(
            "https://b.test",
            r#"{"type":"PING","payload":1}"#,
        ));

        assert!(calls.lock().is_empty());
        let metrics = bridge.metrics();
        assert_eq!(metrics.origin_rejected, 1);
        assert_eq!(metrics.decode_failures, 0);
        assert_eq!(metrics.unroutable, 0);
    }

    #[test]
    fn test_allowed_origin_reaches_handler() {
        let (bridge, host) = container_on("https://host.test", &["https://a.test"], PeerContexts::new());
        let calls = spy_handler(&bridge, "PING");

        host.deliver(&MessageEvent::new(
            "https://a.test",
            r#"{"type":"PING","payload":1}"#,
        ));

        assert_eq!(*calls.lock(), vec![json!(1)]);
    }

    #[test]
    fn test_garbage_from_allowed_origin_is_dropped() {
        let (bridge, host) = container_on("https://host.test", &["https://a.test"], PeerContexts::new());
        let calls = spy_handler(&bridge, "PING");

        for body in ["", "null", "42", "{\"payload\":1}", "<html>"] {
            host.deliver(&MessageEvent::new("https://a.test", body));
        }
        host.deliver(&MessageEvent::new(
            "https://a.test",
            r#"{"type":"PING","payload":"still alive"}"#,
        ));

        assert_eq!(*calls.lock(), vec![json!("still alive")]);
        assert_eq!(bridge.metrics().decode_failures, 5);
    }

    // =============================================================================
    // CODEC
    // =============================================================================

    #[test]
    fn test_sealed_round_trip_and_wrong_key() {
        let message = BridgeMessage::new("X", json!({"n": 1}));

        let k1 = Communicator::new(Some("k1")).unwrap();
        let wire = k1.encode(&message).unwrap();
        assert_eq!(k1.decode(&wire).unwrap(), message);

        let k2 = Communicator::new(Some("k2")).unwrap();
        assert!(matches!(k2.decode(&wire), Err(CodecError::Crypto(_))));
    }

    #[test]
    fn test_unregistered_type_is_silent() {
        let (bridge, host) = container_on("https://host.test", &["https://a.test"], PeerContexts::new());
        let calls = spy_handler(&bridge, "KNOWN");

        host.deliver(&MessageEvent::new(
            "https://a.test",
            r#"{"type":"UNKNOWN","payload":{}}"#,
        ));

        assert!(calls.lock().is_empty());
        assert_eq!(bridge.metrics().unroutable, 1);
    }

    // =============================================================================
    // FAN-OUT AND ROUTING
    // =============================================================================

    #[test]
    fn test_container_dispatches_to_every_frame_and_tab() {
        let frames = [SpyWindow::named("f1"), SpyWindow::named("f2")];
        let tabs = [SpyTab::new(), SpyTab::new()];
        let contexts = PeerContexts::new()
            .with_frame(frames[0].clone())
            .with_frame(frames[1].clone())
            .with_tab("t1", tabs[0].clone())
            .with_tab("t2", tabs[1].clone());
        let (bridge, _host) = container_on("https://host.test", &[], contexts);

        let report = bridge.send("EVT", json!({}));
        assert_eq!(report.attempted, 4);
        assert_eq!(report.delivered, 4);

        let mut bodies: Vec<String> = frames.iter().flat_map(|f| f.bodies()).collect();
        bodies.extend(tabs.iter().flat_map(|t| t.bodies()));
        assert_eq!(bodies.len(), 4);
        assert!(bodies.iter().all(|b| *b == bodies[0]));

        assert_eq!(tabs[0].sends.lock()[0].0, "t1");
        assert_eq!(tabs[1].sends.lock()[0].0, "t2");
        assert!(frames.iter().all(|f| f.targets() == vec!["*".to_string()]));
    }

    #[test]
    fn test_subapp_routes_to_opener_with_first_origin() {
        let opener = SpyWindow::named("opener");
        let parent = SpyWindow::named("parent");
        let config = BridgeConfigBuilder::new(BridgeRole::SubApp)
            .allowed_origin("https://parent.test")
            .build()
            .unwrap();
        let bridge = Bridge::new(
            config,
            PeerContexts::new()
                .with_opener(opener.clone())
                .with_parent(parent.clone()),
            BrowsingContext::new("https://child.test"),
        )
        .unwrap();

        bridge.send("PONG", json!({}));

        assert_eq!(opener.targets(), vec!["https://parent.test".to_string()]);
        assert!(parent.posts.lock().is_empty());
    }

    // =============================================================================
    // REGISTRY AND LIFECYCLE
    // =============================================================================

    #[test]
    fn test_second_registration_replaces_first() {
        let (bridge, host) = container_on("https://host.test", &["https://a.test"], PeerContexts::new());
        let h1 = spy_handler(&bridge, "PING");
        let h2 = spy_handler(&bridge, "PING");

        host.deliver(&MessageEvent::new(
            "https://a.test",
            r#"{"type":"PING","payload":null}"#,
        ));

        assert!(h1.lock().is_empty());
        assert_eq!(h2.lock().len(), 1);
    }

    #[test]
    fn test_destroyed_bridge_ignores_inbound() {
        let (bridge, host) = container_on("https://host.test", &["https://a.test"], PeerContexts::new());
        let calls = spy_handler(&bridge, "PING");

        bridge.destroy();
        host.deliver(&MessageEvent::new(
            "https://a.test",
            r#"{"type":"PING","payload":1}"#,
        ));

        assert!(calls.lock().is_empty());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_send_after_destroy_still_dispatches() {
        let frame = SpyWindow::named("f1");
        let (bridge, _host) = container_on(
            "https://host.test",
            &[],
            PeerContexts::new().with_frame(frame.clone()),
        );
        bridge.destroy();

        assert_eq!(bridge.send("EVT", json!(1)).delivered, 1);
        assert_eq!(frame.posts.lock().len(), 1);
    }

    #[test]
    fn test_dropping_bridge_detaches_listener() {
        let host = BrowsingContext::new("https://host.test");
        {
            let config = BridgeConfigBuilder::new(BridgeRole::Container).build().unwrap();
            let _bridge = Bridge::new(config, PeerContexts::new(), host.clone()).unwrap();
            assert_eq!(host.listener_count(), 1);
        }
        assert_eq!(host.listener_count(), 0);
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    fn arb_payload() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "\\PC{0,12}".prop_map(Value::from),
        ];
        leaf.prop_recursive(2, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_fan_out_count(frames in 0usize..5, tabs in 0usize..5) {
            let windows: Vec<Arc<SpyWindow>> = (0..frames).map(|_| SpyWindow::named("f")).collect();
            let senders: Vec<Arc<SpyTab>> = (0..tabs).map(|_| SpyTab::new()).collect();

            let mut contexts = PeerContexts::new();
            for window in &windows {
                contexts = contexts.with_frame(window.clone() as Arc<dyn PeerWindow>);
            }
            for (i, sender) in senders.iter().enumerate() {
                contexts = contexts.with_tab(format!("t{i}"), sender.clone() as Arc<dyn TabSender>);
            }
            let (bridge, _host) = container_on("https://host.test", &[], contexts);

            let report = bridge.send("EVT", json!({"k": 1}));
            prop_assert_eq!(report.attempted, frames + tabs);
            prop_assert_eq!(report.delivered, frames + tabs);
        }

        #[test]
        fn prop_payload_survives_bridge(payload in arb_payload(), sealed in any::<bool>()) {
            let secret = if sealed { Some("prop-key") } else { None };
            let codec = Communicator::new(secret).unwrap();
            let frame = SpyWindow::named("f");

            let mut config = BridgeConfigBuilder::new(BridgeRole::Container).build().unwrap();
            config.secret_key = secret.map(str::to_string);
            let bridge = Bridge::new(
                config,
                PeerContexts::new().with_frame(frame.clone()),
                BrowsingContext::new("https://host.test"),
            )
            .unwrap();

            bridge.send("EVT", payload.clone());
            let received = codec.decode(&frame.bodies()[0]).unwrap();
            prop_assert_eq!(received.payload, payload);
        }
    }
}
