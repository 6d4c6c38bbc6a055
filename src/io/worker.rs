use crate::state::{ListingOutcome, ListingRequest, TabId};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use super::directory::{read_directory, ListingOptions};
use super::transfer::{transfer, TransferReport, TransferRequest};

pub enum IoCommand {
    List {
        tab: TabId,
        request: ListingRequest,
        options: ListingOptions,
    },
    Transfer(TransferRequest),
}

pub enum IoResult {
    Listed { tab: TabId, outcome: ListingOutcome },
    Transferred(TransferReport),
}

/// Start the background I/O thread.
///
/// The worker only produces results; the caller applies them on its own
/// thread. `wake` runs after every result so the UI can repaint.
pub fn spawn_worker<W>(wake: W) -> (Sender<IoCommand>, Receiver<IoResult>)
where
    W: Fn() + Send + 'static,
{
    let (cmd_tx, cmd_rx) = channel();
    let (res_tx, res_rx) = channel();

    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let result = match cmd {
                IoCommand::List {
                    tab,
                    request,
                    options,
                } => {
                    log::debug!("listing {} for column {}", request.path.display(), request.depth);
                    let entries = read_directory(&request.path, &options);
                    IoResult::Listed {
                        tab,
                        outcome: request.complete(entries),
                    }
                }
                IoCommand::Transfer(request) => IoResult::Transferred(transfer(&request)),
            };
            if res_tx.send(result).is_err() {
                break;
            }
            wake();
        }
        log::debug!("io worker shutting down");
    });

    (cmd_tx, res_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TransferMode;
    use crate::state::{ColumnNavigator, TabsManager};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_listing_round_trip_through_worker() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/inner.txt"), b"x").unwrap();

        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let (tx, rx) = spawn_worker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let tabs = TabsManager::new(dir.path().to_path_buf());
        let tab = tabs.active().id;
        let mut nav = ColumnNavigator::new(
            dir.path().to_path_buf(),
            read_directory(dir.path(), &ListingOptions::default()).unwrap(),
        );
        let request = nav.select(0, 0).unwrap();
        tx.send(IoCommand::List {
            tab,
            request,
            options: ListingOptions::default(),
        })
        .unwrap();

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            IoResult::Listed { tab: got, outcome } => {
                assert_eq!(got, tab);
                assert!(nav.apply_listing(outcome));
            }
            IoResult::Transferred(_) => panic!("unexpected transfer result"),
        }
        assert_eq!(nav.column(1).unwrap().entries[0].name, "inner.txt");

        // The wake callback runs just after the result is sent.
        for _ in 0..100 {
            if wakes.load(Ordering::SeqCst) == 1 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transfer_through_worker() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"a").unwrap();
        let dest = dir.path().join("dest");
        fs::create_dir(&dest).unwrap();

        let (tx, rx) = spawn_worker(|| {});
        tx.send(IoCommand::Transfer(TransferRequest {
            sources: vec![src],
            destination: dest.clone(),
            mode: TransferMode::Copy,
        }))
        .unwrap();

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            IoResult::Transferred(report) => {
                assert_eq!(report.completed, vec![dest.join("a.txt")]);
            }
            IoResult::Listed { .. } => panic!("unexpected listing result"),
        }
    }
}
