//! POEditor API client.
//!
//! See <https://poeditor.com/docs/api>. All endpoints are POSTs with
//! form-encoded parameters; the response is a JSON envelope with a status
//! code and an optional result.

use std::fmt;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const API_URL: &str = "https://api.poeditor.com/v2";

pub const RATE_LIMIT_ERROR_CODE: u32 = 4048;

// Upload limits from https://poeditor.com/docs/api_rates
pub const PAID_ACCOUNT_UPLOAD_RATE_LIMIT: Duration = Duration::from_secs(10);
pub const FREE_ACCOUNT_UPLOAD_RATE_LIMIT: Duration = Duration::from_secs(20);

/// A non-success status reported by the POEditor API.
///
/// See <https://poeditor.com/docs/error_codes>.
#[derive(Debug)]
pub struct ApiError {
    pub code: u32,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "POEditor API returned {} error code - {}",
            self.code, self.message
        )?;

        let description = error_description(self.code);
        if !description.is_empty() {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

fn error_description(code: u32) -> &'static str {
    match code {
        401 => "Every API request requires an API token.",
        4011 => "There is no account associated with the API token used for this request.",
        4012 => "Please use a POST request (only POST requests accepted).",
        403 => "The resource you are trying to access is restricted for this account. (wrong project ID)",
        4030 => "The endpoint requires a token with writing permissions.",
        4031 => "API Token is valid but the account doesn't have API access.",
        4032 => "The account reached the maximum number of strings.",
        4033 => "There's an import in progress.",
        4034 => "The project has been archived and cannot be accessed unless restored.",
        404 => "The method used is not supported.",
        4042 => "Parameter -data- must be a JSON object",
        4043 => "This language is not in the list of available languages.",
        4044 => "The language code does not correspond to any of the languages in this project.",
        4045 => "Parameter -language- is missing or empty.",
        4046 => "The file could not be parsed.",
        4047 => "Wrong export file format chosen.",
        RATE_LIMIT_ERROR_CODE => "File uploads are limited according to plan.",
        4049 => "The parameter -updating- could not be found in the request.",
        4050 => "The language you are trying to add already exists in the project.",
        4051 => "The download link (export file) could not be found on server.",
        4052 => "Download URLs expire after 10 minutes.",
        4053 => "The URL is valid but the project/language has been deleted.",
        429 => "Too many pending requests in your queue (over 200).",
        _ => "",
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
struct ResponseStatus {
    code: String,
    message: String,
}

impl ResponseStatus {
    fn into_result(self) -> Result<()> {
        let code: u32 = self.code.parse().unwrap_or(0);
        if code == 200 {
            Ok(())
        } else {
            Err(ApiError {
                code,
                message: self.message,
            }
            .into())
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: ResponseStatus,
    result: Option<T>,
}

pub struct Client {
    api_url: String,
    token: String,
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Self {
        Client::with_base_url(token, API_URL)
    }

    fn with_base_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Client {
            api_url: api_url.into(),
            token: token.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let mut form: Vec<(&str, &str)> = params.to_vec();
        form.push(("api_token", &self.token));

        let response = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .form(&form)
            .send()
            .context("making HTTP request")?;

        let envelope: Envelope<T> = response.json().context("decoding response")?;
        envelope.response.into_result()?;
        Ok(envelope.result)
    }

    pub fn project_languages(&self, project_id: &str) -> Result<Vec<Language>> {
        #[derive(Deserialize)]
        struct LanguagesResult {
            languages: Vec<Language>,
        }

        let result: LanguagesResult = self
            .request("/languages/list", &[("id", project_id)])?
            .ok_or_else(|| anyhow!("missing result in languages list response"))?;
        Ok(result.languages)
    }

    /// Requests a JSON export and returns its download URL.
    pub fn export_url(&self, project_id: &str, language_code: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct ExportResult {
            url: String,
        }

        let result: ExportResult = self
            .request(
                "/projects/export",
                &[
                    ("id", project_id),
                    ("language", language_code),
                    ("type", "json"),
                ],
            )?
            .ok_or_else(|| anyhow!("missing result in export response"))?;
        Ok(result.url)
    }

    /// Downloads a previously requested export.
    pub fn download(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .context("making HTTP request for export")?;
        response.text().context("reading export body")
    }

    pub fn add_language(&self, project_id: &str, language_code: &str) -> Result<()> {
        self.request::<serde_json::Value>(
            "/languages/add",
            &[("id", project_id), ("language", language_code)],
        )?;
        Ok(())
    }

    /// Uploads terms and translations for one language. New content only;
    /// existing translations are never overwritten.
    pub fn upload(&self, project_id: &str, language_code: &str, file: Vec<u8>) -> Result<()> {
        let form = reqwest::blocking::multipart::Form::new()
            .text("api_token", self.token.clone())
            .text("id", project_id.to_string())
            .text("updating", "terms_translations")
            .part(
                "file",
                reqwest::blocking::multipart::Part::bytes(file).file_name("file.json"),
            )
            .text("language", language_code.to_string())
            .text("overwrite", "0");

        let response = self
            .http
            .post(format!("{}{}", self.api_url, "/projects/upload"))
            .multipart(form)
            .send()
            .context("making HTTP request")?;

        let envelope: Envelope<serde_json::Value> =
            response.json().context("decoding response")?;
        envelope.response.into_result()
    }
}
