//! Common test utilities for infinidat-tools integration tests
//!
//! [`TestHost`] lays out a fake root in a temp directory: config files,
//! an lsb-release, apt directories and shell scripts standing in for
//! `infinihost`, `apt-get`, `update-initramfs` and `systemctl`. Every
//! script appends its arguments to `calls.log`.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Stock lvm.conf excerpt carrying the commented global_filter line
pub const LVM_CONF: &str = "devices {\n\
\t# Configuration option devices/global_filter.\n\
\t# global_filter = [ \"a|.*|\" ]\n\
\tobtain_device_list_from_udev = 1\n\
}\n";

pub const MULTIPATH_CONF: &str = "defaults {\n\
\tuser_friendly_names yes\n\
\tskip_kpartx no\n\
}\n";

pub const LVM_FILTER: &str = "[ \"r|/dev/sd.*|\" ]";

pub const KEY: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----\ntest\n-----END PGP PUBLIC KEY BLOCK-----\n";

/// A fake host for running the real binary against
pub struct TestHost {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub root: PathBuf,
}

#[allow(dead_code)]
impl TestHost {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let host = Self { temp, root };

        host.write_file("etc/lvm/lvm.conf", LVM_CONF);
        host.write_file("etc/multipath.conf", MULTIPATH_CONF);
        host.write_file(
            "etc/lsb-release",
            "DISTRIB_ID=Ubuntu\nDISTRIB_RELEASE=22.04\nDISTRIB_CODENAME=jammy\n",
        );
        for tool in ["infinihost", "apt-get", "update-initramfs", "systemctl"] {
            host.fake_tool(tool, 0);
        }
        host.write_settings("");
        host
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("Failed to read file")
    }

    pub fn file_exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Replace `name` with a script that logs its arguments and exits with `code`
    pub fn fake_tool(&self, name: &str, code: i32) {
        let log = self.path("calls.log");
        self.write_script(
            name,
            &format!(
                "echo \"{name} $*\" >> '{}'\necho \"{name} output\"\nexit {code}\n",
                log.display()
            ),
        );
    }

    /// Make `name` unavailable
    pub fn remove_tool(&self, name: &str) {
        std::fs::remove_file(self.path(&format!("bin/{name}"))).expect("Failed to remove tool");
    }

    fn write_script(&self, name: &str, body: &str) {
        let relative = format!("bin/{name}");
        self.write_file(&relative, &format!("#!/bin/sh\n{body}"));
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(self.path(&relative), std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make script executable");
        }
    }

    /// Lines logged by the fake tools so far
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Write the settings file; `options` is YAML for the `options` mapping
    pub fn write_settings(&self, options: &str) {
        let p = |relative: &str| self.path(relative).display().to_string();
        let yaml = format!(
            "options:\n{options}\
             paths:\n  \
               multipath_conf: {}\n  \
               lvm_conf: {}\n  \
               results_dir: {}\n  \
               lsb_release: {}\n  \
               apt_sources_dir: {}\n  \
               apt_keyring_dir: {}\n  \
               state_dir: {}\n\
             commands:\n  \
               infinihost: {}\n  \
               apt_get: {}\n  \
               update_initramfs: {}\n  \
               systemctl: {}\n\
             key_url: http://127.0.0.1:9/gpg.key\n",
            p("etc/multipath.conf"),
            p("etc/lvm/lvm.conf"),
            p("results"),
            p("etc/lsb-release"),
            p("etc/apt/sources.list.d"),
            p("etc/apt/trusted.gpg.d"),
            p("state"),
            p("bin/infinihost"),
            p("bin/apt-get"),
            p("bin/update-initramfs"),
            p("bin/systemctl"),
        );
        let yaml = if options.is_empty() {
            yaml.replacen("options:\n", "", 1)
        } else {
            yaml
        };
        self.write_file("settings.yaml", &yaml);
    }

    /// Settings with a repository, a key and an lvm filter
    pub fn write_default_settings(&self) {
        let key = KEY.replace('\n', "\\n");
        self.write_settings(&format!(
            "  install_sources: deb https://repo.infinidat.com/packages/main-stable/apt/linux-ubuntu {{distrib_codename}} main\n  \
               install_keys: \"{key}\"\n  \
               lvm_global_filter: '{LVM_FILTER}'\n"
        ));
    }

    /// The binary, configured for this host and the console runtime
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("infinidat-tools").expect("binary should build");
        cmd.env_remove("JUJU_CONTEXT_ID")
            .env_remove("JUJU_DISPATCH_PATH")
            .env_remove("JUJU_UNIT_NAME")
            .env_remove("JUJU_MODEL_NAME")
            .env_remove("RUST_LOG")
            .env("INFINIDAT_TOOLS_RUNTIME", "console")
            .env("INFINIDAT_TOOLS_SETTINGS", self.path("settings.yaml"));
        cmd
    }

    pub fn results_files(&self) -> Vec<PathBuf> {
        let dir = self.path("results");
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };
        entries.filter_map(|e| e.ok()).map(|e| e.path()).collect()
    }
}

#[allow(dead_code)]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
