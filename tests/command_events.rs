mod common;

use parking_lot::Mutex;
use std::sync::Arc;

use chainconsole::events::{
    dispatcher,
    model::{CommandOutcome, LogEvent},
    sink::LogSink,
};
use chainconsole::node::memory::{ChainState, StaticConfigLoader};
use common::{request, Fixture};

struct MemorySink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

#[async_trait::async_trait]
impl LogSink for MemorySink {
    async fn handle(&self, event: &LogEvent) {
        self.events.lock().push(event.clone());
    }
}

fn outcome_of(events: &[LogEvent], name: &str) -> Vec<CommandOutcome> {
    events
        .iter()
        .filter_map(|e| match e {
            LogEvent::Command(c) if c.command == name => Some(c.outcome),
            _ => None,
        })
        .collect()
}

fn has_system(events: &[LogEvent], action: &str) -> bool {
    events
        .iter()
        .any(|e| matches!(e, LogEvent::System(s) if s.action == action))
}

#[tokio::test]
async fn dispatched_commands_are_recorded() {
    let mem = Arc::new(MemorySink {
        events: Arc::new(Mutex::new(Vec::new())),
    });
    dispatcher::init_events(vec![mem.clone()], 64).await;

    let loader = StaticConfigLoader::p2p([("node.0", "127.0.0.1:30300"), ("node.1", "broken")]);
    let fx = Fixture::with_loader(
        ChainState {
            number: 9,
            ..Default::default()
        },
        loader,
    );
    let d = fx.dispatcher();

    request(&d, "status").await.unwrap();
    request(&d, "nonsense").await.unwrap();
    request(&d, "amdb.select only_table").await.unwrap();
    request(&d, "p2p.update").await.unwrap();
    request(&d, "miner.add abc").await.unwrap();
    fx.chain.set_failure(Some("boom"));
    request(&d, "p2p.miners").await.unwrap();

    // Allow dispatch loop to process
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let evts = mem.events.lock();
    assert_eq!(outcome_of(&evts, "status"), vec![CommandOutcome::Ok]);
    assert_eq!(outcome_of(&evts, "nonsense"), vec![CommandOutcome::Unknown]);
    assert_eq!(outcome_of(&evts, "amdb.select"), vec![CommandOutcome::Usage]);
    assert_eq!(outcome_of(&evts, "p2p.miners"), vec![CommandOutcome::Failed]);
    assert!(has_system(&evts, "static_node_skipped"), "events: {:?}", *evts);
    assert!(has_system(&evts, "static_nodes_replaced"));
    assert!(has_system(&evts, "miner_tx_submitted"));

    let failure_detail = evts.iter().find_map(|e| match e {
        LogEvent::Command(c) if c.outcome == CommandOutcome::Failed => c.detail.clone(),
        _ => None,
    });
    assert!(
        failure_detail.as_deref().is_some_and(|d| d.contains("boom")),
        "failure detail should carry the cause: {:?}",
        failure_detail
    );
}
