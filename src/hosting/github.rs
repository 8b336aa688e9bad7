//! GitHub REST implementation of [`HostingApi`]
//!
//! Blocking `reqwest` client; every call authenticates with the bearer token
//! and every non-success status becomes a transport error carrying the body.

use crate::error::{MatterPressError, Result};
use crate::hosting::{BlobContent, ChangeRecord, FileStatus, HostingApi, RepoRef, TreeEntry};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Public GitHub API root
pub const API_ROOT: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";
const FILE_MODE: &str = "100644";

#[derive(Deserialize)]
struct Sha {
    sha: String,
}

#[derive(Deserialize)]
struct GitRef {
    object: Sha,
}

#[derive(Deserialize)]
struct Repository {
    name: String,
    owner: Owner,
}

#[derive(Deserialize)]
struct Owner {
    login: String,
}

#[derive(Deserialize)]
struct CommitDetails {
    #[serde(default)]
    files: Vec<CommitFile>,
}

#[derive(Deserialize)]
struct CommitFile {
    filename: String,
    status: String,
}

#[derive(Deserialize)]
struct Contents {
    content: String,
    encoding: String,
}

#[derive(Deserialize)]
struct GitCommit {
    tree: Sha,
}

#[derive(Serialize)]
struct NewBlob<'a> {
    content: &'a str,
    encoding: &'a str,
}

#[derive(Serialize)]
struct NewTree<'a> {
    base_tree: &'a str,
    tree: Vec<NewTreeEntry<'a>>,
}

#[derive(Serialize)]
struct NewTreeEntry<'a> {
    path: &'a str,
    mode: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    sha: &'a str,
}

#[derive(Serialize)]
struct NewCommit<'a> {
    message: &'a str,
    tree: &'a str,
    parents: &'a [String],
}

#[derive(Serialize)]
struct RefUpdate<'a> {
    sha: &'a str,
}

/// Authenticated GitHub client
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    token: String,
    api_root: Url,
}

impl GithubClient {
    /// Client against the public API
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_api_root(token, API_ROOT)
    }

    /// Client against another API root, e.g. a GitHub Enterprise host
    pub fn with_api_root(token: impl Into<String>, api_root: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("matterpress/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MatterPressError::transport("build client", e.to_string()))?;
        let api_root = Url::parse(api_root)
            .map_err(|e| MatterPressError::transport("parse api root", e.to_string()))?;
        Ok(Self {
            http,
            token: token.into(),
            api_root,
        })
    }

    /// URL of `/repos/{owner}/{name}/{segments...}`, each segment percent-encoded
    fn repo_url(&self, repo: &RepoRef, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| MatterPressError::transport("build url", "api root cannot be a base"))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
            .extend(segments.iter().flat_map(|s| s.split('/')));
        Ok(url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn send(&self, operation: &str, builder: RequestBuilder) -> Result<Response> {
        debug!("GitHub: {}", operation);
        self.authed(builder)
            .send()
            .map_err(|e| MatterPressError::transport(operation, e.to_string()))
    }

    fn get<T: DeserializeOwned>(&self, operation: &str, url: Url) -> Result<T> {
        let response = self.send(operation, self.http.get(url))?;
        read_json(operation, response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, operation: &str, url: Url, body: &B) -> Result<T> {
        let response = self.send(operation, self.http.post(url).json(body))?;
        read_json(operation, response)
    }
}

fn read_json<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(MatterPressError::transport(
            operation,
            format!("{}: {}", status, body.trim()),
        ));
    }
    response
        .json::<T>()
        .map_err(|e| MatterPressError::transport(operation, e.to_string()))
}

fn decode_contents(path: &str, contents: Contents) -> Result<String> {
    let operation = format!("decode {}", path);
    // files over 1 MB come back with encoding "none" and no content
    if contents.encoding != "base64" {
        return Err(MatterPressError::transport(
            &operation,
            format!("unsupported content encoding {:?}", contents.encoding),
        ));
    }
    let packed: String = contents.content.split_whitespace().collect();
    let bytes = STANDARD
        .decode(packed)
        .map_err(|e| MatterPressError::transport(&operation, e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MatterPressError::transport(&operation, e.to_string()))
}

impl HostingApi for GithubClient {
    fn repository(&self, owner: &str, name: &str) -> Result<RepoRef> {
        let url = self.repo_url(&RepoRef::new(owner, name), &[])?;
        let repo: Repository = self.get("get repository", url)?;
        Ok(RepoRef::new(repo.owner.login, repo.name))
    }

    fn branch_head(&self, repo: &RepoRef, branch: &str) -> Result<String> {
        let url = self.repo_url(repo, &["git", "ref", "heads", branch])?;
        let git_ref: GitRef = self.get("get branch ref", url)?;
        Ok(git_ref.object.sha)
    }

    fn commit_files(&self, repo: &RepoRef, sha: &str) -> Result<Vec<ChangeRecord>> {
        let url = self.repo_url(repo, &["commits", sha])?;
        let commit: CommitDetails = self.get("get commit", url)?;
        Ok(commit
            .files
            .into_iter()
            .map(|f| ChangeRecord::new(f.filename, FileStatus::parse(&f.status)))
            .collect())
    }

    fn file_content(&self, repo: &RepoRef, path: &str, branch: &str) -> Result<Option<String>> {
        let operation = format!("get contents of {}", path);
        let mut url = self.repo_url(repo, &["contents", path])?;
        url.query_pairs_mut().append_pair("ref", branch);

        let response = self.send(&operation, self.http.get(url))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let contents: Contents = read_json(&operation, response)?;
        decode_contents(path, contents).map(Some)
    }

    fn create_blob(&self, repo: &RepoRef, content: &BlobContent) -> Result<String> {
        let url = self.repo_url(repo, &["git", "blobs"])?;
        let encoded;
        let body = match content {
            BlobContent::Text(text) => NewBlob {
                content: text,
                encoding: "utf-8",
            },
            BlobContent::Binary(bytes) => {
                encoded = STANDARD.encode(bytes);
                NewBlob {
                    content: &encoded,
                    encoding: "base64",
                }
            }
        };
        let blob: Sha = self.post("create blob", url, &body)?;
        Ok(blob.sha)
    }

    fn commit_tree(&self, repo: &RepoRef, commit_sha: &str) -> Result<String> {
        let url = self.repo_url(repo, &["git", "commits", commit_sha])?;
        let commit: GitCommit = self.get("get commit tree", url)?;
        Ok(commit.tree.sha)
    }

    fn create_tree(&self, repo: &RepoRef, base_tree: &str, entries: &[TreeEntry]) -> Result<String> {
        let url = self.repo_url(repo, &["git", "trees"])?;
        let body = NewTree {
            base_tree,
            tree: entries
                .iter()
                .map(|entry| NewTreeEntry {
                    path: &entry.path,
                    mode: FILE_MODE,
                    kind: "blob",
                    sha: &entry.sha,
                })
                .collect(),
        };
        let tree: Sha = self.post("create tree", url, &body)?;
        Ok(tree.sha)
    }

    fn create_commit(
        &self,
        repo: &RepoRef,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String> {
        let url = self.repo_url(repo, &["git", "commits"])?;
        let body = NewCommit {
            message,
            tree,
            parents,
        };
        let commit: Sha = self.post("create commit", url, &body)?;
        Ok(commit.sha)
    }

    fn update_ref(&self, repo: &RepoRef, branch: &str, sha: &str) -> Result<()> {
        let url = self.repo_url(repo, &["git", "refs", "heads", branch])?;
        let response = self.send("update branch ref", self.http.patch(url).json(&RefUpdate { sha }))?;
        let _: GitRef = read_json("update branch ref", response)?;
        Ok(())
    }
}
