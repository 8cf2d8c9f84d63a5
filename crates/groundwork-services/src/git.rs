//! Local git plumbing for environment repositories.
//!
//! Synchronous-feeling wrappers over the async process helpers; every call
//! checks the exit status, unlike the tool's upstream script which ignored
//! it.

use groundwork_core::util::process;
use groundwork_types::Result;
use std::path::Path;

/// Clone a repository into `workdir/<name>`.
pub async fn clone_into(url: &str, name: &str, workdir: &Path) -> Result<()> {
    process::run_async_in("git", &["clone", url, name], workdir)
        .await?
        .require_success("git clone")?;
    Ok(())
}

/// Rename a remote.
pub async fn rename_remote(repo: &Path, from: &str, to: &str) -> Result<()> {
    process::run_async_in("git", &["remote", "rename", from, to], repo)
        .await?
        .require_success("git remote rename")?;
    Ok(())
}

/// Add a remote.
pub async fn add_remote(repo: &Path, name: &str, url: &str) -> Result<()> {
    process::run_async_in("git", &["remote", "add", name, url], repo)
        .await?
        .require_success("git remote add")?;
    Ok(())
}

/// Stage everything and commit.
pub async fn commit_all(repo: &Path, message: &str) -> Result<()> {
    process::run_async_in("git", &["add", "-A", "."], repo)
        .await?
        .require_success("git add")?;
    process::run_async_in("git", &["commit", "-m", message], repo)
        .await?
        .require_success("git commit")?;
    Ok(())
}

/// Push a branch to a remote, setting upstream.
pub async fn push(repo: &Path, remote: &str, branch: &str) -> Result<()> {
    process::run_async_in("git", &["push", "-u", remote, branch], repo)
        .await?
        .require_success("git push")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    async fn init_repo(dir: &Path) {
        for args in [
            vec!["init", "-b", "master"],
            vec!["config", "user.email", "ops@example.com"],
            vec!["config", "user.name", "ops"],
        ] {
            process::run_async_in("git", &args, dir)
                .await
                .unwrap()
                .require_success("git")
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_commit_all_records_files() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path()).await;
        std::fs::write(dir.path().join("all.yml"), "a: 1\n").unwrap();

        commit_all(dir.path(), "Setup Commit").await.unwrap();

        let log = process::run_in(
            "git",
            &["log", "--oneline"],
            dir.path(),
            &HashMap::new(),
            None,
        )
        .unwrap();
        assert!(log.stdout.contains("Setup Commit"));
    }

    #[tokio::test]
    async fn test_remote_rewiring() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path()).await;

        add_remote(dir.path(), "origin", "git@example.com:group/template.git")
            .await
            .unwrap();
        rename_remote(dir.path(), "origin", "upstream").await.unwrap();
        add_remote(dir.path(), "origin", "git@example.com:group/env.git")
            .await
            .unwrap();

        let remotes = process::run_in("git", &["remote"], dir.path(), &HashMap::new(), None)
            .unwrap();
        assert!(remotes.stdout.contains("upstream"));
        assert!(remotes.stdout.contains("origin"));
    }

    #[tokio::test]
    async fn test_clone_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = clone_into("/nonexistent/repo.git", "env", dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("git clone"));
    }
}
