//! Command helper methods for Test.

use std::process::Output;

use assert_cmd::Command;

use super::{MockGitHub, Test};

impl Test {
    /// Create a sealpost command isolated from the caller's environment.
    ///
    /// HOME points at the temp home and every env var the CLI reads is
    /// cleared, so a developer's own token never leaks into a test.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sealpost").expect("failed to find sealpost binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in [
            "GITHUB_TOKEN",
            "KCLI_PIPELINES_RUNNER_TOKEN",
            "SEALPOST_CONFIG",
            "SEALPOST_DEFAULTS",
            "SEALPOST_LOG",
            "PUBLIC_KEY",
            "SECRET",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// `sealpost run` against `server` with the standard target and tokens.
    pub fn run_cmd(&self, server: &MockGitHub) -> Command {
        let mut cmd = self.cmd();
        cmd.args([
            "run",
            "--api-url",
            server.url(),
            "--owner",
            "acme",
            "--repo",
            "infra",
            "--workflow",
            "deploy.yml",
            "--ref",
            "main",
            "--token",
            "ghp_test_token",
            "--runner-token",
            "runner-123",
        ]);
        cmd.arg("--defaults-file").arg(self.defaults_path());
        cmd
    }

    /// Shortcut for `sealpost run` with extra args.
    pub fn run(&self, server: &MockGitHub, args: &[&str]) -> Output {
        self.run_cmd(server)
            .args(args)
            .output()
            .expect("failed to run sealpost run")
    }

    /// Shortcut for `sealpost seal --key KEY VALUE`.
    pub fn seal(&self, key: &str, value: &str) -> Output {
        self.cmd()
            .args(["seal", "--key", key, value])
            .output()
            .expect("failed to run sealpost seal")
    }

    /// Shortcut for `sealpost defaults show`.
    pub fn defaults_show(&self) -> Output {
        self.cmd()
            .args(["defaults", "show", "--file"])
            .arg(self.defaults_path())
            .output()
            .expect("failed to run sealpost defaults show")
    }
}
