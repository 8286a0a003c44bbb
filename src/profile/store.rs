use anyhow::{Context, Result, bail};
use log::{debug, info};
use reqwest::blocking::Client;

use super::parse::parse_records;
use super::session::ProfileRecord;

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

/// Fetches every row of the configured table, newest-first. The full list
/// is loaded in one request; there is no query-level filtering or paging.
pub fn fetch_records(config: &StoreConfig) -> Result<Vec<ProfileRecord>> {
    let endpoint = format!(
        "{}/rest/v1/{}",
        config.url.trim_end_matches('/'),
        config.table
    );
    debug!("fetching records from {endpoint}");

    let response = Client::new()
        .get(&endpoint)
        .query(&[
            ("select", "id,json_content,created_at"),
            ("order", "created_at.desc"),
        ])
        .header("apikey", &config.api_key)
        .bearer_auth(&config.api_key)
        .send()
        .with_context(|| format!("failed to reach the record store at {endpoint}"))?;

    let status = response.status();
    let body = response
        .text()
        .context("failed to read the record store response")?;

    if !status.is_success() {
        bail!(
            "record store returned {status} for {endpoint}: {}",
            snippet(&body)
        );
    }

    let records = parse_records(&body)
        .with_context(|| format!("failed to parse rows from {endpoint}"))?;
    info!("fetched {} records from {}", records.len(), config.table);
    Ok(records)
}

fn snippet(body: &str) -> String {
    body.trim().chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serves one canned HTTP response on an ephemeral local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let port = listener.local_addr().expect("local addr").port();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });

        port
    }

    fn config_for(port: u16) -> StoreConfig {
        StoreConfig {
            url: format!("http://127.0.0.1:{port}"),
            api_key: "test-key".to_owned(),
            table: "profiles".to_owned(),
        }
    }

    #[test]
    fn non_success_statuses_surface_status_and_body() {
        let port = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"error":"boom"}"#);

        let error = fetch_records(&config_for(port)).unwrap_err();
        let message = format!("{error:#}");
        assert!(message.contains("500"), "missing status in: {message}");
        assert!(message.contains("boom"), "missing body snippet in: {message}");
    }

    #[test]
    fn successful_responses_parse_into_records() {
        let port = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{ "id": 3, "json_content": { "A": { "strength": 7 } } }]"#,
        );

        let records = fetch_records(&config_for(port)).expect("fetch succeeds");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 3);
    }

    #[test]
    fn error_snippets_are_trimmed_and_truncated() {
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).chars().count(), 200);
        assert_eq!(snippet("  short  "), "short");
    }
}
