//! IPFS uploads.

use resolver::{BodyMode, EndpointConfig, HttpMethod, ResolverError};
use serde::{Deserialize, Serialize};

/// One file to upload. `content` is base64 data or a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpfsFile {
    pub path: String,
    pub content: String,
}

/// Parameters for [`upload_folder`].
#[derive(Debug, Clone, Default)]
pub struct UploadFolderParams {
    pub files: Vec<IpfsFile>,
}

/// The body parameter is called `abi` on the wire.
#[derive(Debug, Serialize)]
pub struct UploadFolderApiParams {
    abi: Vec<IpfsFile>,
}

/// One entry of the raw `uploadFolder` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIpfsPath {
    pub path: String,
}

/// Gateway URL of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpfsPath {
    pub path: String,
}

impl IpfsPath {
    /// The content identifier, taken from the `/ipfs/{cid}/...` segment.
    pub fn cid(&self) -> Option<&str> {
        let (_, rest) = self.path.split_once("/ipfs/")?;
        rest.split('/').next().filter(|cid| !cid.is_empty())
    }
}

/// `POST ipfs/uploadFolder`
///
/// The request body is the bare file array, not an object wrapping it.
pub fn upload_folder(
) -> EndpointConfig<UploadFolderParams, UploadFolderApiParams, Vec<RawIpfsPath>, Vec<IpfsPath>, Vec<IpfsPath>>
{
    EndpointConfig::new(
        "uploadFolder",
        |_| "ipfs/uploadFolder".to_string(),
        parse_upload_folder,
        |raw: &Vec<RawIpfsPath>| {
            raw.iter()
                .map(|r| IpfsPath {
                    path: r.path.clone(),
                })
                .collect()
        },
        Vec::clone,
    )
    .with_method(HttpMethod::Post)
    .with_body_params(&["abi"])
    .with_body_mode(BodyMode::Replace)
}

fn parse_upload_folder(p: &UploadFolderParams) -> Result<UploadFolderApiParams, ResolverError> {
    if let Some(file) = p.files.iter().find(|f| f.path.is_empty()) {
        return Err(ResolverError::invalid_params(format!(
            "File path must not be empty (content starts with {:?})",
            file.content.chars().take(16).collect::<String>()
        )));
    }
    Ok(UploadFolderApiParams {
        abi: p.files.clone(),
    })
}
