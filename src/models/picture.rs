//! Picture model and service.

use std::fmt;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::client::MiroClient;
use crate::context::CallContext;
use crate::decode::{Decode, Field};
use crate::error::Result;

const PICTURES_PATH: &str = "pictures";

/// A picture attached to a board, team or user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub id: String,
    pub image_url: String,
}

impl Decode for Picture {
    const ENTITY: &'static str = "picture";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |p| &mut p.id),
        Field::string("imageurl", |p| &mut p.image_url),
    ];
}

/// The picture reference embedded in boards, teams and users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniPicture {
    pub id: String,
    pub image_url: String,
}

impl Decode for MiniPicture {
    const ENTITY: &'static str = "mini_picture";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |p| &mut p.id),
        Field::string("imageurl", |p| &mut p.image_url),
    ];
}

/// The kind of object a picture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureOwner {
    Boards,
    Teams,
    Users,
}

impl PictureOwner {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boards => "boards",
            Self::Teams => "teams",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for PictureOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image upload for [`PicturesService::upsert`].
#[derive(Debug, Clone)]
pub struct UpsertPictureRequest {
    /// Raw image bytes.
    pub image: Vec<u8>,
    /// File name reported in the multipart part.
    pub file_name: String,
}

impl UpsertPictureRequest {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            file_name: "picture".to_string(),
        }
    }
}

/// Picture operations. Obtained with [`MiroClient::pictures`].
#[derive(Debug, Clone, Copy)]
pub struct PicturesService<'a> {
    client: &'a MiroClient,
}

impl MiroClient {
    pub fn pictures(&self) -> PicturesService<'_> {
        PicturesService { client: self }
    }
}

impl PicturesService<'_> {
    /// Get the picture of a board, team or user.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CallContext, owner: PictureOwner, id: &str) -> Result<Picture> {
        let request = self.client.get_request(&picture_path(owner, id))?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Create or replace the picture of a board, team or user.
    #[tracing::instrument(skip(self, ctx, upload), fields(bytes = upload.image.len()))]
    pub async fn upsert(
        &self,
        ctx: &CallContext,
        owner: PictureOwner,
        id: &str,
        upload: UpsertPictureRequest,
    ) -> Result<Picture> {
        let part = Part::bytes(upload.image).file_name(upload.file_name);
        let form = Form::new().part("image", part);
        let request = self
            .client
            .multipart_request(Method::POST, &picture_path(owner, id), form)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Delete the picture of a board, team or user.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &CallContext, owner: PictureOwner, id: &str) -> Result<()> {
        let request = self.client.delete_request(&picture_path(owner, id))?;
        self.client
            .fetch_empty(ctx, request, &[StatusCode::NO_CONTENT])
            .await
    }
}

fn picture_path(owner: PictureOwner, id: &str) -> String {
    format!("{owner}/{}/{PICTURES_PATH}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picture_path() {
        assert_eq!(picture_path(PictureOwner::Boards, "1"), "boards/1/pictures");
        assert_eq!(picture_path(PictureOwner::Teams, "1"), "teams/1/pictures");
        assert_eq!(picture_path(PictureOwner::Users, "1"), "users/1/pictures");
    }

    #[test]
    fn test_picture_image_url_casings() {
        for key in ["imageUrl", "imageURL", "ImageUrl"] {
            let body = format!(r#"{{"type": "boards", "id": "1", "{key}": "test-image-url"}}"#);
            let picture = Picture::from_slice(body.as_bytes()).unwrap();
            assert_eq!(
                picture,
                Picture {
                    id: "1".to_string(),
                    image_url: "test-image-url".to_string()
                }
            );
        }
    }
}
