//! Repository URL parsing.

use url::Url;

/// Host served by the GitHub resolver.
pub const GITHUB_HOST: &str = "github.com";

/// The `(host, owner, project)` triple of a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl {
    pub host: String,
    pub owner: String,
    /// Project name with any trailing `.git` removed
    pub project: String,
}

impl RepositoryUrl {
    /// Parse a repository URL.
    ///
    /// Accepts anything with a scheme (`https://`, `git://`, `ssh://`,
    /// `git+https://`) as well as scp-style `git@host:owner/project.git`.
    /// The owner and project are the first two non-empty path segments.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (host, path) = match Url::parse(text) {
            Ok(url) => (url.host_str()?.to_string(), url.path().to_string()),
            Err(_) => parse_scp(text)?,
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next()?.to_string();
        let project = segments.next()?;
        let project = project.strip_suffix(".git").unwrap_or(project);
        if project.is_empty() {
            return None;
        }

        Some(Self {
            host,
            owner,
            project: project.to_string(),
        })
    }

    #[must_use]
    pub fn is_github(&self) -> bool {
        self.host == GITHUB_HOST
    }
}

/// Split `user@host:path` into host and path.
fn parse_scp(text: &str) -> Option<(String, String)> {
    if text.contains("://") {
        return None;
    }
    let (user_host, path) = text.split_once(':')?;
    let host = user_host.rsplit_once('@').map_or(user_host, |(_, host)| host);
    if host.is_empty() || host.contains('/') {
        return None;
    }
    Some((host.to_ascii_lowercase(), path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> Option<(String, String, String)> {
        RepositoryUrl::parse(text).map(|r| (r.host, r.owner, r.project))
    }

    #[test]
    fn test_https_url() {
        assert_eq!(
            parts("https://github.com/madler/zlib"),
            Some(("github.com".into(), "madler".into(), "zlib".into()))
        );
    }

    #[test]
    fn test_strips_git_suffix() {
        let repo = RepositoryUrl::parse("https://github.com/apple/swift-nio.git").unwrap();
        assert_eq!(repo.project, "swift-nio");
        assert!(repo.is_github());
    }

    #[test]
    fn test_extra_segments_ignored() {
        let repo = RepositoryUrl::parse("https://github.com/org/proj/tree/main/src").unwrap();
        assert_eq!((repo.owner.as_str(), repo.project.as_str()), ("org", "proj"));
    }

    #[test]
    fn test_scp_style() {
        assert_eq!(
            parts("git@github.com:org/repo.git"),
            Some(("github.com".into(), "org".into(), "repo".into()))
        );
    }

    #[test]
    fn test_other_host() {
        let repo = RepositoryUrl::parse("https://gitlab.com/org/repo").unwrap();
        assert!(!repo.is_github());
    }

    #[test]
    fn test_unparseable() {
        assert!(RepositoryUrl::parse("").is_none());
        assert!(RepositoryUrl::parse("https://github.com/orgonly").is_none());
        assert!(RepositoryUrl::parse("https://github.com/org/.git").is_none());
        assert!(RepositoryUrl::parse("not a url").is_none());
    }
}
