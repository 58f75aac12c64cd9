use gloo::net::http;
use jitterplot_common::{parse_csv, Error, Point};

pub trait Fetch: Sized {
    async fn fetch(url: &str) -> Result<Self, Error>;
}

impl Fetch for Vec<Point> {
    async fn fetch(url: &str) -> Result<Self, Error> {
        let response = http::Request::get(url)
            .send()
            .await
            .map_err(|e| Error::request(e.to_string()))?;
        ensure_success(response.status(), url)?;
        let text = response
            .text()
            .await
            .map_err(|e| Error::request(e.to_string()))?;
        parse_csv(&text)
    }
}

/// Anything outside 2xx is a failed load, whatever the body says.
fn ensure_success(status: u16, url: &str) -> Result<(), Error> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(Error::status(status, url))
    }
}
