use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::services::pdf_service::{self, PdfError};
use crate::tools::{ToolError, ToolInvoker};

const EMAIL_SUBJECT: &str = "Your Journey AI Travel Itinerary";
const EMAIL_BODY: &str = "Here is your personalized travel plan. Enjoy your trip!";

#[derive(Debug)]
pub enum EmailError {
    NotConfigured(String),
    Pdf(PdfError),
    Io(std::io::Error),
    Tool(ToolError),
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailError::NotConfigured(msg) => write!(f, "Email is not configured: {}", msg),
            EmailError::Pdf(err) => write!(f, "{}", err),
            EmailError::Io(err) => write!(f, "Temp file error: {}", err),
            EmailError::Tool(err) => write!(f, "Email delivery failed: {}", err),
        }
    }
}

impl Error for EmailError {}

impl From<PdfError> for EmailError {
    fn from(err: PdfError) -> Self {
        EmailError::Pdf(err)
    }
}

impl From<std::io::Error> for EmailError {
    fn from(err: std::io::Error) -> Self {
        EmailError::Io(err)
    }
}

impl From<ToolError> for EmailError {
    fn from(err: ToolError) -> Self {
        EmailError::Tool(err)
    }
}

/// Deletes the transient PDF on drop, so every exit path of the send flow
/// releases the artifact, including tool failures.
struct TempArtifact {
    path: PathBuf,
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            eprintln!(
                "Failed to clean up temp file {}: {}",
                self.path.display(),
                err
            );
        } else {
            println!("Cleaned up temporary file: {}", self.path.display());
        }
    }
}

/// Renders the itinerary to a uniquely named PDF in the temp storage dir,
/// exposes it through the public base URL, then drives the two-step
/// draft-and-send email capability. The PDF artifact is removed whether the
/// send succeeds or fails.
pub async fn send_itinerary_email(
    tools: &Arc<dyn ToolInvoker>,
    email: &str,
    markdown_text: &str,
) -> Result<(), EmailError> {
    let base_url = env::var("PUBLIC_BASE_URL")
        .map_err(|_| EmailError::NotConfigured("PUBLIC_BASE_URL is not set".to_string()))?;
    let base_url = Url::parse(&base_url)
        .map_err(|e| EmailError::NotConfigured(format!("PUBLIC_BASE_URL is invalid: {}", e)))?;

    let filename = format!("{}.pdf", Uuid::new_v4());
    let dir = pdf_service::temp_storage_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(&filename);

    println!("Generating temporary PDF for email: {}", filename);
    let pdf_bytes = pdf_service::create_pdf_from_itinerary(markdown_text)?;
    fs::write(&path, &pdf_bytes)?;
    let _artifact = TempArtifact { path };

    let public_pdf_url = base_url
        .join(&format!("temp/{}", filename))
        .map_err(|e| EmailError::NotConfigured(format!("cannot build public URL: {}", e)))?;
    println!("PDF available at public URL: {}", public_pdf_url);

    let draft_id = tools
        .invoke(
            "draft_email",
            json!({
                "recipient": email,
                "subject": EMAIL_SUBJECT,
                "body": EMAIL_BODY,
                "attachment_url": public_pdf_url.as_str(),
            }),
        )
        .await?;

    tools
        .invoke("send_draft_email", json!({ "draft_id": draft_id.trim() }))
        .await?;

    println!("Itinerary email sent to {}", email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use serial_test::serial;
    use std::sync::Mutex;

    /// Gateway stub that records invocations and optionally fails the send
    /// step.
    struct MailStub {
        fail_send: bool,
        attachment_urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ToolInvoker for MailStub {
        async fn invoke(&self, tool: &str, args: Value) -> Result<String, ToolError> {
            match tool {
                "draft_email" => {
                    let url = args["attachment_url"].as_str().unwrap_or_default();
                    self.attachment_urls.lock().unwrap().push(url.to_string());
                    Ok("draft-123".to_string())
                }
                "send_draft_email" => {
                    assert_eq!(args["draft_id"], "draft-123");
                    if self.fail_send {
                        Err(ToolError::Malformed("scripted send failure".to_string()))
                    } else {
                        Ok("sent".to_string())
                    }
                }
                other => Err(ToolError::UnknownTool(other.to_string())),
            }
        }
    }

    fn pdf_count(dir: &std::path::Path) -> usize {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "pdf"))
                .count(),
            Err(_) => 0,
        }
    }

    fn scoped_temp_dir(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("journey-email-test-{}-{}", tag, Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        env::set_var("TEMP_DIR", &dir);
        env::set_var("PUBLIC_BASE_URL", "https://example.ngrok.app");
        dir
    }

    #[tokio::test]
    #[serial]
    async fn temp_pdf_is_removed_after_successful_send() {
        let dir = scoped_temp_dir("ok");
        let stub: Arc<dyn ToolInvoker> = Arc::new(MailStub {
            fail_send: false,
            attachment_urls: Mutex::new(Vec::new()),
        });

        send_itinerary_email(&stub, "traveler@example.com", "# Lisbon\n\nDay 1.")
            .await
            .unwrap();

        assert_eq!(pdf_count(&dir), 0);
        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    #[serial]
    async fn temp_pdf_is_removed_when_send_fails() {
        let dir = scoped_temp_dir("fail");
        let stub: Arc<dyn ToolInvoker> = Arc::new(MailStub {
            fail_send: true,
            attachment_urls: Mutex::new(Vec::new()),
        });

        let result = send_itinerary_email(&stub, "traveler@example.com", "# Lisbon").await;
        assert!(matches!(result, Err(EmailError::Tool(_))));

        assert_eq!(pdf_count(&dir), 0);
        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    #[serial]
    async fn attachment_url_points_into_the_temp_route() {
        let dir = scoped_temp_dir("url");
        let stub = Arc::new(MailStub {
            fail_send: false,
            attachment_urls: Mutex::new(Vec::new()),
        });
        let tools: Arc<dyn ToolInvoker> = stub.clone();

        send_itinerary_email(&tools, "traveler@example.com", "# Lisbon")
            .await
            .unwrap();

        let urls = stub.attachment_urls.lock().unwrap();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("https://example.ngrok.app/temp/"));
        assert!(urls[0].ends_with(".pdf"));
        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    #[serial]
    async fn missing_base_url_is_a_configuration_error() {
        env::remove_var("PUBLIC_BASE_URL");
        let stub: Arc<dyn ToolInvoker> = Arc::new(MailStub {
            fail_send: false,
            attachment_urls: Mutex::new(Vec::new()),
        });

        let result = send_itinerary_email(&stub, "traveler@example.com", "# Lisbon").await;
        assert!(matches!(result, Err(EmailError::NotConfigured(_))));
    }
}
