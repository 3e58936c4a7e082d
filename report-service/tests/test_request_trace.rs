//! FILENAME: tests/test_request_trace.rs
//! ENTER/EXIT tracing of execution requests in the unified log file.

mod common;

use common::FakeBackend;
use report_service::{init_logging, ReportClient, ServiceConfig};

fn count_lines(content: &str, needle: &str) -> usize {
    content.lines().filter(|l| l.contains(needle)).count()
}

#[tokio::test]
async fn test_every_execute_logs_one_enter_and_one_exit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.log");
    init_logging(Some(&path)).unwrap();

    let backend = FakeBackend::start().await;
    let client = backend.client();
    assert!(client.execute("sales", &[]).await.is_ok());
    assert!(client.execute("crash", &[]).await.is_err());
    assert!(client.execute("ragged", &[]).await.is_err());
    assert!(client.execute("error", &[]).await.is_err());

    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let offline = ReportClient::new(&ServiceConfig::new(format!("http://{}", addr))).unwrap();
    assert!(offline.execute("offline", &[]).await.is_err());

    let content = std::fs::read_to_string(&path).unwrap();
    for report in ["sales", "crash", "ragged", "error", "offline"] {
        assert_eq!(
            count_lines(&content, &format!("|ENTER execute report={} ", report)),
            1,
            "ENTER for {}",
            report
        );
        assert_eq!(
            count_lines(&content, &format!("|EXIT execute report={} ", report)),
            1,
            "EXIT for {}",
            report
        );
    }

    let sales_exit = content
        .lines()
        .find(|l| l.contains("|EXIT execute report=sales "))
        .unwrap();
    assert!(sales_exit.ends_with("rows=12 cols=5"), "{}", sales_exit);
    let crash_exit = content
        .lines()
        .find(|l| l.contains("|EXIT execute report=crash "))
        .unwrap();
    assert!(crash_exit.contains("failed: Execution service returned HTTP 500"), "{}", crash_exit);
}
