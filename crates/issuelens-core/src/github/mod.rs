// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Parses repository URLs and fetches issues over the GitHub REST API.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::IssueLensError;

pub mod issues;

pub use issues::GitHubClient;

/// Matches `http(s)://github.com/<owner>/<repo>` on already lower-cased input.
static REPO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/([^/]+)/([^/]+)").expect("valid repository URL regex")
});

/// Parses a GitHub repository URL to extract owner and repo.
///
/// The input is trimmed and lower-cased before matching, so the returned
/// pair is always lower-case. Anything after the repo segment (extra path,
/// `?query`, `#fragment`, `.git`) is ignored.
///
/// # Errors
///
/// Returns `InvalidInput` if the URL is not a GitHub repository URL.
pub fn parse_repo_url(url: &str) -> crate::Result<(String, String)> {
    let normalized = url.trim().to_lowercase();

    let captures = REPO_URL_RE.captures(&normalized).ok_or_else(|| {
        IssueLensError::invalid_input(format!(
            "Invalid GitHub repository URL.\n\
             Expected: https://github.com/owner/repo\n\
             Got: {}",
            url.trim()
        ))
    })?;

    let owner = captures[1].to_string();
    let repo = captures[2]
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches(".git")
        .to_string();

    if owner.is_empty() || repo.is_empty() {
        return Err(IssueLensError::invalid_input(format!(
            "Invalid GitHub repository URL: {}",
            url.trim()
        )));
    }

    debug!(owner = %owner, repo = %repo, "Parsed repository URL");
    Ok((owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_url_basic() {
        let (owner, repo) = parse_repo_url("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_repo_url_lowercases_and_ignores_trailing_path() {
        let (owner, repo) = parse_repo_url("  https://GitHub.com/Foo/Bar/issues/5 ").unwrap();
        assert_eq!((owner.as_str(), repo.as_str()), ("foo", "bar"));
    }

    #[test]
    fn test_parse_repo_url_accepts_http_and_trailing_slash() {
        let (owner, repo) = parse_repo_url("HTTP://github.com/Owner/Repo/").unwrap();
        assert_eq!((owner.as_str(), repo.as_str()), ("owner", "repo"));
    }

    #[test]
    fn test_parse_repo_url_strips_query_and_fragment() {
        let (_, repo) = parse_repo_url("https://github.com/foo/bar?tab=issues").unwrap();
        assert_eq!(repo, "bar");

        let (_, repo) = parse_repo_url("https://github.com/foo/bar#readme").unwrap();
        assert_eq!(repo, "bar");
    }

    #[test]
    fn test_parse_repo_url_strips_git_suffix() {
        let (_, repo) = parse_repo_url("https://github.com/foo/bar.git").unwrap();
        assert_eq!(repo, "bar");
    }

    #[test]
    fn test_parse_repo_url_rejects_malformed() {
        for input in [
            "",
            "github.com/foo/bar",
            "https://gitlab.com/foo/bar",
            "https://github.com/foo",
            "https://github.com/foo/",
            "ftp://github.com/foo/bar",
            "https://github.com.evil.io/foo/bar",
            "https://github.com/foo/?x=1",
        ] {
            let err = parse_repo_url(input).expect_err(input);
            assert!(
                matches!(err, IssueLensError::InvalidInput { .. }),
                "{input} should be invalid input"
            );
        }
    }
}
