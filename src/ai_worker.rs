use crate::ai::{generate_question_set, QuestionGenerator};
use crate::error::GenerationError;
use crate::models::{GenerationRequest, GenerationResponse};
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Run question generation off the UI thread.
///
/// The worker handles one request at a time and answers each with exactly one
/// response. It exits when the request channel disconnects.
pub fn spawn_generation_worker(
    generator: Arc<dyn QuestionGenerator>,
    response_tx: Sender<GenerationResponse>,
    request_rx: Receiver<GenerationRequest>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("interactive-case-quiz::generation_worker".to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();

            while let Ok(GenerationRequest::Generate { text, count }) = request_rx.recv() {
                info!(count, "worker received generation request");

                let response = match &runtime {
                    Ok(rt) => {
                        match rt.block_on(generate_question_set(generator.as_ref(), &text, count)) {
                            Ok(questions) => GenerationResponse::Questions(questions),
                            Err(e) => {
                                warn!(error = %e, "question generation failed");
                                GenerationResponse::Failed(e)
                            }
                        }
                    }
                    Err(e) => GenerationResponse::Failed(GenerationError::RequestFailure(format!(
                        "Failed to start async runtime: {}",
                        e
                    ))),
                };

                if response_tx.send(response).is_err() {
                    break;
                }
            }

            info!("generation worker exiting");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::generator::{MockGenerator, TWO_QUESTIONS_JSON};
    use std::time::Duration;

    fn run_once(generator: MockGenerator, text: &str) -> GenerationResponse {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded();
        let handle = spawn_generation_worker(Arc::new(generator), resp_tx, req_rx).unwrap();

        req_tx
            .send(GenerationRequest::Generate {
                text: text.to_string(),
                count: 2,
            })
            .unwrap();
        let response = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        drop(req_tx);
        handle.join().unwrap();
        response
    }

    #[test]
    fn test_worker_returns_parsed_questions() {
        match run_once(MockGenerator::replying(TWO_QUESTIONS_JSON), "notes") {
            GenerationResponse::Questions(questions) => assert_eq!(questions.len(), 2),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_worker_returns_malformed_with_raw_text() {
        match run_once(MockGenerator::replying("not json"), "notes") {
            GenerationResponse::Failed(e) => assert_eq!(e.raw_response(), Some("not json")),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_worker_exits_when_requests_disconnect() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded::<GenerationRequest>();
        let (resp_tx, _resp_rx) = crossbeam_channel::unbounded();
        let handle = spawn_generation_worker(
            Arc::new(MockGenerator::replying("[]")),
            resp_tx,
            req_rx,
        )
        .unwrap();
        drop(req_tx);
        assert!(handle.join().is_ok());
    }
}
