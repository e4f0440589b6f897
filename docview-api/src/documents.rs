use docview_lib::document::Document;
use docview_lib::query::{PageQuery, Skip, Limit};
use docview_lib::validation::document_valid;
use reqwest::blocking::RequestBuilder;

use crate::client::ApiClient;
use crate::error::RequestError;

pub const DOCUMENT_PATH: &str = "/document";

/// `GET /document?skip=&limit=`
pub struct QueryDocuments {
    query: PageQuery
}

impl QueryDocuments {
    pub fn new() -> Self {
        QueryDocuments {
            query: PageQuery::default()
        }
    }

    pub fn page(query: PageQuery) -> Self {
        QueryDocuments { query }
    }

    pub fn skip(&mut self, skip: Skip) -> &mut Self {
        self.query.skip = skip;
        self
    }

    pub fn limit(&mut self, limit: Limit) -> &mut Self {
        self.query.limit = limit;
        self
    }

    pub(crate) fn request(&self, client: &ApiClient) -> Result<RequestBuilder, RequestError> {
        Ok(client.get(DOCUMENT_PATH)?.query(&self.query))
    }

    pub fn send(&self, client: &ApiClient) -> Result<Vec<Document>, RequestError> {
        tracing::debug!(
            skip = self.query.skip,
            limit = self.query.limit,
            "requesting documents"
        );

        let res = self.request(client)?.send()?;

        match res.status() {
            reqwest::StatusCode::OK => {
                let documents: Vec<Document> = res.json()?;

                tracing::debug!("received {} documents", documents.len());

                Ok(documents)
            },
            _ => Err(RequestError::from_response(res))
        }
    }
}

impl Default for QueryDocuments {
    fn default() -> Self {
        QueryDocuments::new()
    }
}

/// `POST /document`
pub struct CreateDocument {
    body: Document
}

impl CreateDocument {
    pub fn new(body: Document) -> Self {
        CreateDocument { body }
    }

    pub(crate) fn request(&self, client: &ApiClient) -> Result<RequestBuilder, RequestError> {
        Ok(client.post(DOCUMENT_PATH)?.json(&self.body))
    }

    pub fn send(self, client: &ApiClient) -> Result<Document, RequestError> {
        document_valid(&self.body)?;

        tracing::debug!(doc_id = self.body.doc_id, "creating document");

        let res = self.request(client)?.send()?;

        match res.status() {
            reqwest::StatusCode::OK | reqwest::StatusCode::CREATED => Ok(res.json()?),
            _ => Err(RequestError::from_response(res))
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    use reqwest::Url;

    use super::*;

    /// answers one request with the given status line and body. the handle
    /// yields the raw request as received.
    fn serve_once(status: &str, content_type: &str, body: String) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );

        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0;

            loop {
                let mut line = String::new();

                if reader.read_line(&mut line).unwrap() == 0 {
                    break;
                }

                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }

                request.push_str(&line);

                if line == "\r\n" {
                    break;
                }
            }

            let mut payload = vec![0; content_length];
            reader.read_exact(&mut payload).unwrap();
            request.push_str(&String::from_utf8(payload).unwrap());

            let mut stream = reader.into_inner();
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body.as_bytes()).unwrap();
            stream.flush().unwrap();

            request
        });

        (Url::parse(&format!("http://127.0.0.1:{port}/api")).unwrap(), handle)
    }

    fn client_for(url: Url) -> ApiClient {
        let mut builder = ApiClient::builder();
        builder.base_url(url);
        builder.build().unwrap()
    }

    fn client() -> ApiClient {
        let mut builder = ApiClient::builder();
        builder.base_url(Url::parse("http://localhost:5000").unwrap());
        builder.build().unwrap()
    }

    fn sample() -> Document {
        Document {
            doc_id: 4,
            title: String::from("Title"),
            date: String::from("2023-01-01T00:00:00"),
            url: String::from("https://example.com/4"),
            author: String::from("Author"),
            concept1: String::from("a"),
            concept2: String::from("b"),
        }
    }

    #[test]
    fn query_url_for_first_page() {
        let client = client();
        let req = QueryDocuments::new()
            .request(&client)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.method(), reqwest::Method::GET);
        assert_eq!(req.url().as_str(), "http://localhost:5000/document?skip=0&limit=2");
    }

    #[test]
    fn negative_skip_is_passed_through() {
        let client = client();
        let mut builder = QueryDocuments::new();
        builder.skip(-2).limit(2);

        let req = builder.request(&client)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.url().query(), Some("skip=-2&limit=2"));
    }

    #[test]
    fn create_posts_json_body() {
        let client = client();
        let req = CreateDocument::new(sample())
            .request(&client)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.method(), reqwest::Method::POST);
        assert_eq!(req.url().as_str(), "http://localhost:5000/document");

        let body = req.body()
            .and_then(|b| b.as_bytes())
            .unwrap();
        let sent: Document = serde_json::from_slice(body).unwrap();

        assert_eq!(sent, sample());
    }

    #[test]
    fn create_rejects_invalid_document_before_sending() {
        // nothing listens on this port, a request would fail with a
        // reqwest error rather than a validation error
        let mut builder = ApiClient::builder();
        builder.base_url(Url::parse("http://127.0.0.1:9").unwrap());
        let client = builder.build().unwrap();

        let mut doc = sample();
        doc.title = String::new();

        let result = CreateDocument::new(doc).send(&client);

        assert!(matches!(result, Err(RequestError::Invalid(_))));
    }

    #[test]
    fn send_reads_document_array() {
        let mut second = sample();
        second.doc_id = 5;

        let body = serde_json::to_string(&vec![sample(), second.clone()]).unwrap();
        let (url, server) = serve_once("200 OK", "application/json", body);
        let client = client_for(url);

        let mut builder = QueryDocuments::new();
        builder.skip(-2).limit(2);

        let documents = builder.send(&client).unwrap();
        let request = server.join().unwrap();

        assert_eq!(documents, vec![sample(), second]);
        assert!(
            request.starts_with("GET /api/document?skip=-2&limit=2 HTTP/1.1\r\n"),
            "{}", request
        );
        assert!(
            request.to_ascii_lowercase().contains("user-agent: docview/"),
            "{}", request
        );
    }

    #[test]
    fn send_keeps_body_of_error_status() {
        let (url, server) = serve_once(
            "500 Internal Server Error",
            "text/plain",
            String::from("Internal server error")
        );
        let client = client_for(url);

        let result = QueryDocuments::new().send(&client);
        server.join().unwrap();

        match result {
            Err(RequestError::Status { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "Internal server error");
            },
            other => panic!("expected status error: {:?}", other),
        }
    }

    #[test]
    fn send_rejects_malformed_body() {
        let (url, server) = serve_once("200 OK", "application/json", String::from("<html>not json</html>"));
        let client = client_for(url);

        let result = QueryDocuments::new().send(&client);
        server.join().unwrap();

        assert!(matches!(result, Err(RequestError::Reqwest(_))), "{:?}", result);
    }

    #[test]
    fn create_returns_stored_document() {
        let body = serde_json::to_string(&sample()).unwrap();
        let (url, server) = serve_once("201 Created", "application/json", body);
        let client = client_for(url);

        let created = CreateDocument::new(sample()).send(&client).unwrap();
        let request = server.join().unwrap();

        assert_eq!(created, sample());
        assert!(request.starts_with("POST /api/document HTTP/1.1\r\n"), "{}", request);

        let (_, sent) = request.split_once("\r\n\r\n").unwrap();
        let sent: Document = serde_json::from_str(sent).unwrap();

        assert_eq!(sent, sample());
    }

    #[test]
    fn create_surfaces_rejection() {
        let (url, server) = serve_once("409 Conflict", "text/plain", String::from("doc_id already exists"));
        let client = client_for(url);

        let result = CreateDocument::new(sample()).send(&client);
        server.join().unwrap();

        match result {
            Err(RequestError::Status { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::CONFLICT);
                assert_eq!(body, "doc_id already exists");
            },
            other => panic!("expected status error: {:?}", other),
        }
    }
}
