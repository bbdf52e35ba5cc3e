//! Latest-wins delivery for overlapping generate requests.

use jsxify::pipeline::GenerateSession;
use jsxify::{FormatError, Pipeline, SourceFormatter};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Blocks on sources containing "slow" until the test releases it.
struct Gated {
    started: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl SourceFormatter for Gated {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        if source.contains("slow") {
            self.started.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        Ok(source.to_string())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn superseded_request_is_dropped() {
    let (started_tx, started_rx) = channel();
    let (release_tx, release_rx) = channel();
    let formatter = Gated {
        started: Mutex::new(started_tx),
        release: Mutex::new(release_rx),
    };
    let pipeline = Pipeline::new().with_formatter(Arc::new(formatter));
    let session = GenerateSession::new(Arc::new(pipeline));

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.generate("slow").await })
    };
    tokio::task::spawn_blocking(move || started_rx.recv().unwrap())
        .await
        .unwrap();

    let second = session.generate("fast").await.expect("latest request is delivered");
    assert!(second.source.contains("<p>fast</p>"));
    assert!(second.formatted);

    release_tx.send(()).unwrap();
    assert_eq!(first.await.unwrap(), None);
    assert_eq!(session.revision(), 2);
}

#[tokio::test]
async fn each_settled_request_is_delivered() {
    let (started_tx, _started_rx) = channel();
    let (_release_tx, release_rx) = channel();
    let formatter = Gated {
        started: Mutex::new(started_tx),
        release: Mutex::new(release_rx),
    };
    let session = GenerateSession::new(Arc::new(Pipeline::new().with_formatter(Arc::new(formatter))));

    for input in ["one", "two", "three"] {
        let output = session.generate(input).await.expect("no newer request");
        assert!(output.source.contains(&format!("<p>{input}</p>")));
    }
    assert_eq!(session.revision(), 3);
}
