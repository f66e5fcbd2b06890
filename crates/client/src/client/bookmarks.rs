//! Video bookmark endpoints.

use serde_json::Value;

use crate::client::{CallOptions, VmsClient};
use crate::error::{ClientError, Result};
use crate::models::{self, Bookmark, BookmarkSearchParams, NewBookmark};

impl VmsClient {
    /// Search bookmarks by keyword and color filters.
    pub async fn search_bookmarks(&self, params: &BookmarkSearchParams) -> Result<Vec<Bookmark>> {
        let options = CallOptions::get()
            .query_opt("Keyword", params.keyword.as_deref())
            .query_opt("Colors", params.colors.as_deref())
            .data_key("Bookmarks");
        let payload = self
            .call("/Interface/Cameras/Bookmarks/Search", options)
            .await?;
        Ok(models::normalize_records(payload))
    }

    /// Create a bookmark. The upstream reply is passed through.
    pub async fn add_bookmark(&self, bookmark: &NewBookmark) -> Result<Value> {
        let body = serde_json::to_value(bookmark)
            .map_err(|e| ClientError::MalformedResponse(format!("unencodable bookmark: {e}")))?;
        self.call(
            "/Interface/Cameras/Bookmarks/Add",
            CallOptions::post().body(body),
        )
        .await
    }

    /// Delete a bookmark by id. The upstream reply is passed through.
    pub async fn delete_bookmark(&self, id: &str) -> Result<Value> {
        self.call(
            "/Interface/Cameras/Bookmarks/Delete",
            CallOptions::delete().query("id", id),
        )
        .await
    }
}
