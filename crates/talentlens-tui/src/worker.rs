//! Background worker that talks to the recommendation endpoint.
//!
//! The UI thread never blocks on the network: it sends [`WorkerCommand`]s and
//! drains [`WorkerEvent`]s between frames. The worker owns a current-thread
//! tokio runtime for the async HTTP client. Commands are still read while a
//! request is in flight, so `Quit` or a newer search abandons it.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use talentlens_core::{Error, Recommender, ResultItem, SearchTicket};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error};

#[derive(Debug)]
pub enum WorkerCommand {
    Search(SearchTicket),
    Quit,
}

pub enum WorkerEvent {
    SearchResults {
        ticket: SearchTicket,
        outcome: talentlens_core::Result<Vec<ResultItem>>,
    },
}

enum Flight {
    Landed(talentlens_core::Result<Vec<ResultItem>>),
    Interrupted(Option<WorkerCommand>),
}

pub fn start_worker(
    recommender: Arc<dyn Recommender>,
    cmd_rx: UnboundedReceiver<WorkerCommand>,
    evt_tx: Sender<WorkerEvent>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || worker_loop(recommender, cmd_rx, evt_tx))
}

fn worker_loop(
    recommender: Arc<dyn Recommender>,
    mut cmd_rx: UnboundedReceiver<WorkerCommand>,
    evt_tx: Sender<WorkerEvent>,
) {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt.block_on(serve(recommender.as_ref(), &mut cmd_rx, &evt_tx)),
        Err(e) => {
            error!("Worker runtime unavailable: {}", e);
            while let Some(WorkerCommand::Search(ticket)) = cmd_rx.blocking_recv() {
                let outcome = Err(Error::Other("worker runtime unavailable".to_string()));
                if evt_tx
                    .send(WorkerEvent::SearchResults { ticket, outcome })
                    .is_err()
                {
                    break;
                }
            }
        }
    }
}

async fn serve(
    recommender: &dyn Recommender,
    cmd_rx: &mut UnboundedReceiver<WorkerCommand>,
    evt_tx: &Sender<WorkerEvent>,
) {
    let mut next = cmd_rx.recv().await;

    loop {
        let mut pending = match next.take() {
            Some(WorkerCommand::Search(ticket)) => ticket,
            Some(WorkerCommand::Quit) | None => return,
        };

        // Coalesce bursts: only the newest ticket can still be applied.
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                WorkerCommand::Search(ticket) => {
                    debug!(skipped = pending.id, "Coalescing search");
                    pending = ticket;
                }
                WorkerCommand::Quit => return,
            }
        }

        let flight = tokio::select! {
            outcome = recommender.recommend(&pending.request) => Flight::Landed(outcome),
            cmd = cmd_rx.recv() => Flight::Interrupted(cmd),
        };

        match flight {
            Flight::Landed(outcome) => {
                if evt_tx
                    .send(WorkerEvent::SearchResults {
                        ticket: pending,
                        outcome,
                    })
                    .is_err()
                {
                    return;
                }
                next = cmd_rx.recv().await;
            }
            Flight::Interrupted(cmd) => {
                debug!(abandoned = pending.id, "Request interrupted");
                next = cmd;
            }
        }
    }
}
