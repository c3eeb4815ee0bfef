//! Tests for the CLI runtime, run against a fake HTTP server.

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::thread;

use sgadmin_config::Config;

use super::{AppError, ConfigLoader, run_with_loader};


/// One request observed by [`FakeServer`].
#[derive(Debug, Clone)]
struct CapturedRequest {
    target: String,
    form: Vec<(String, String)>,
}

impl CapturedRequest {
    fn query_value(&self, name: &str) -> Option<String> {
        let query = self.target.split_once('?').map(|(_, query)| query)?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Answers one connection per scripted reply, recording each request
/// before replying.
struct FakeServer {
    port: u16,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeServer {
    fn spawn(replies: Vec<String>) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind fake server");
        let port = listener.local_addr().expect("local addr").port();
        let requests: Arc<Mutex<Vec<CapturedRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = Arc::clone(&requests);
        thread::spawn(move || {
            for reply in replies {
                let Ok((stream, _)) = listener.accept() else {
                    break;
                };
                if Self::serve(stream, &reply, &requests_clone).is_err() {
                    break;
                }
            }
        });
        Self { port, requests }
    }

    fn serve(
        stream: TcpStream,
        reply: &str,
        requests: &Mutex<Vec<CapturedRequest>>,
    ) -> io::Result<()> {
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;

        let mut content_length = 0usize;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header)?;
            let trimmed = header.trim_end();
            if trimmed.is_empty() {
                break;
            }
            if let Some((name, value)) = trimmed.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body)?;

        let target = request_line
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_owned();
        let form = url::form_urlencoded::parse(&body).into_owned().collect();
        requests
            .lock()
            .expect("lock requests")
            .push(CapturedRequest { target, form });

        let mut writer = stream;
        write!(
            writer,
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
            reply.len()
        )?;
        writer.flush()
    }

    fn url(&self) -> String {
        format!("http://127.0.0.1:{}/api/", self.port)
    }

    fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("lock requests").clone()
    }
}

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

fn test_config(server: String) -> Config {
    Config {
        server,
        username: String::from("admin"),
        password: String::from("secret"),
        timeout_secs: 5,
        log_filter: String::from("warn"),
        ..Config::default()
    }
}

/// Output of one CLI run.
struct RunResult {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_cli(config: Config, command: &[&str]) -> RunResult {
    let mut args = vec![OsString::from("sgadmin")];
    args.extend(command.iter().map(OsString::from));
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let loader = StaticConfigLoader { config };
    let exit = run_with_loader(args, &mut stdout, &mut stderr, &loader);
    RunResult {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

#[test]
fn listing_prints_customers_as_json() {
    let server = FakeServer::spawn(vec![String::from(
        "OK\n\"12\" \"Ada\" \"ada@example.com\" \"\" \"yes\" \"01-15-2024\" \"12-31-2024\" \"3\" \"4,\" \"\" \"no\"\n",
    )]);

    let result = run_cli(test_config(server.url()), &["customers", "list", "12"]);

    assert_eq!(result.exit, ExitCode::SUCCESS, "stderr: {}", result.stderr);
    let printed: serde_json::Value =
        serde_json::from_str(&result.stdout).expect("stdout is JSON");
    let first = printed.get(0).expect("one customer");
    assert_eq!(first.get("name").and_then(serde_json::Value::as_str), Some("Ada"));
    assert_eq!(first.get("enabled").and_then(serde_json::Value::as_bool), Some(true));
    let requests = server.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.query_value("action").as_deref(), Some("listCustomers"));
    assert_eq!(request.query_value("username").as_deref(), Some("admin"));
    assert_eq!(request.field("custid"), Some("12"));
}

#[test]
fn listings_larger_than_ten_mebibytes_are_read_in_full() {
    let company = "x".repeat(11 * 1024 * 1024);
    let server = FakeServer::spawn(vec![format!(
        "OK\n\"12\" \"Ada\" \"ada@example.com\" \"{company}\" \"yes\"\n"
    )]);

    let result = run_cli(test_config(server.url()), &["customers", "list"]);

    assert_eq!(result.exit, ExitCode::SUCCESS, "stderr: {}", result.stderr);
    let printed: serde_json::Value =
        serde_json::from_str(&result.stdout).expect("stdout is JSON");
    let first = printed.get(0).expect("one customer");
    assert_eq!(
        first
            .get("company")
            .and_then(serde_json::Value::as_str)
            .map(str::len),
        Some(company.len())
    );
}

#[test]
fn names_shaped_like_literals_are_printed_verbatim() {
    let server = FakeServer::spawn(vec![String::from(
        "OK\n\"12\" \"no\" \"ada@example.com\" \"yes\" \"yes\" \"01-15-2024\" \"12-31-2024\" \"3\" \"\" \"\" \"no\"\n",
    )]);

    let result = run_cli(test_config(server.url()), &["customers", "list"]);

    assert_eq!(result.exit, ExitCode::SUCCESS, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("\"name\": \"no\""), "stdout: {}", result.stdout);
    assert!(result.stdout.contains("\"company\": \"yes\""), "stdout: {}", result.stdout);
}

#[test]
fn protocol_failures_exit_with_two() {
    let server = FakeServer::spawn(vec![String::from(
        "Failed\nCustomer 5 does not exist\n",
    )]);

    let result = run_cli(test_config(server.url()), &["customers", "delete", "5"]);

    assert_eq!(result.exit, ExitCode::from(2));
    assert!(result.stdout.is_empty());
    assert_eq!(
        result.stderr,
        "server replied: Failed\nCustomer 5 does not exist\n"
    );
}

#[test]
fn new_customer_flags_become_form_fields() {
    let server = FakeServer::spawn(vec![String::from("OK\n\"77\"\n")]);

    let result = run_cli(
        test_config(server.url()),
        &[
            "customers",
            "add",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--start-date",
            "2024-03-15",
            "--web-viewer",
        ],
    );

    assert_eq!(result.exit, ExitCode::SUCCESS, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("\"id\": \"77\""));
    let requests = server.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.field("startdate"), Some("03-15-2024"));
    assert_eq!(request.field("webviewer"), Some("yes"));
    assert_eq!(request.field("licenses"), Some("1"));
}

#[test]
fn unreachable_server_is_an_error() {
    let port = {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind spare port");
        listener.local_addr().expect("local addr").port()
    };
    let config = test_config(format!("http://127.0.0.1:{port}/api/"));

    let result = run_cli(config, &["documents", "list"]);

    assert_eq!(result.exit, ExitCode::FAILURE);
    assert!(result.stderr.contains("127.0.0.1"), "stderr: {}", result.stderr);
    assert!(!result.stderr.contains("secret"));
}

#[test]
fn missing_credentials_are_reported() {
    let config = Config {
        username: String::new(),
        ..test_config(String::from("http://127.0.0.1:9/api/"))
    };

    let result = run_cli(config, &["documents", "list"]);

    assert_eq!(result.exit, ExitCode::FAILURE);
    assert!(result.stderr.contains("username"), "stderr: {}", result.stderr);
}

#[test]
fn help_is_printed_to_stdout() {
    let result = run_cli(Config::default(), &["--help"]);
    assert_eq!(result.exit, ExitCode::SUCCESS);
    assert!(result.stdout.contains("Usage"));
}

#[test]
fn malformed_dates_are_usage_errors() {
    let result = run_cli(
        Config::default(),
        &["logs", "list", "--since", "15/03/2024"],
    );
    assert_eq!(result.exit, ExitCode::FAILURE);
    assert!(result.stderr.contains("YYYY-MM-DD"), "stderr: {}", result.stderr);
}
