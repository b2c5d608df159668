//! Lifecycle handler tests against a recording host

use std::path::PathBuf;

use super::*;
use crate::config::CharmOptions;
use crate::error::{self, Result};
use crate::host::{CheckReport, Host};
use crate::provision::PACKAGES;

const KEY: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----\nmQENBFESDRIBCADMR7MQ\n-----END PGP PUBLIC KEY BLOCK-----\n";
const DEFAULT_KEY: &str = "default-key";

#[derive(Debug, Default)]
struct FakeHost {
    codename: String,
    calls: Vec<String>,
    sources: Vec<(String, String)>,
    lvm_filters: Vec<String>,
    check_code: i32,
    fail_install: bool,
    infinihost_missing: bool,
    fail_initramfs: bool,
    fail_lvm: bool,
}

impl FakeHost {
    fn new() -> Self {
        Self {
            codename: "focal".to_string(),
            ..Self::default()
        }
    }

    fn called(&self, name: &str) -> bool {
        self.calls.iter().any(|c| c == name)
    }
}

impl Host for FakeHost {
    fn distrib_codename(&self) -> Result<String> {
        Ok(self.codename.clone())
    }

    fn fetch_default_key(&self) -> Result<String> {
        Ok(DEFAULT_KEY.to_string())
    }

    fn add_source(&mut self, source: &str, key: &str) -> Result<()> {
        self.calls.push("add_source".to_string());
        self.sources.push((source.to_string(), key.to_string()));
        Ok(())
    }

    fn update_index(&mut self) -> Result<()> {
        self.calls.push("update_index".to_string());
        Ok(())
    }

    fn install_packages(&mut self, packages: &[&str]) -> Result<()> {
        self.calls.push(format!("install {}", packages.join(" ")));
        if self.fail_install {
            return Err(error::packages::install_failed(packages, "exit status 100"));
        }
        Ok(())
    }

    fn settings_check(&mut self, auto_fix: bool) -> Result<i32> {
        self.calls.push(format!("settings_check auto_fix={auto_fix}"));
        if self.infinihost_missing {
            return Err(error::tools::not_installed("infinihost", "host-power-tools"));
        }
        Ok(self.check_code)
    }

    fn settings_check_report(&mut self, auto_fix: bool) -> Result<CheckReport> {
        self.calls.push(format!("settings_check_report auto_fix={auto_fix}"));
        if self.infinihost_missing {
            return Err(error::tools::not_installed("infinihost", "host-power-tools"));
        }
        Ok(CheckReport {
            code: self.check_code,
            path: PathBuf::from("/home/ubuntu/infinihost-results/infinihost-out-abc123"),
        })
    }

    fn regenerate_initramfs(&mut self) -> Result<()> {
        self.calls.push("regenerate_initramfs".to_string());
        if self.fail_initramfs {
            return Err(error::tools::initramfs_failed("exit status 1"));
        }
        Ok(())
    }

    fn update_multipath_conf(&mut self, restart: bool) -> Result<()> {
        self.calls.push(format!("update_multipath_conf restart={restart}"));
        Ok(())
    }

    fn set_lvm_global_filter(&mut self, value: &str) -> Result<()> {
        self.calls.push("set_lvm_global_filter".to_string());
        if self.fail_lvm {
            return Err(error::patch::pattern_not_found("/etc/lvm/lvm.conf", "anchor"));
        }
        self.lvm_filters.push(value.to_string());
        Ok(())
    }
}

fn options(source: &str, key: Option<&str>) -> CharmOptions {
    CharmOptions {
        install_sources: Some(source.to_string()),
        install_keys: key.map(str::to_string),
        lvm_global_filter: Some("[ \"r|.*|\" ]".to_string()),
    }
}

fn unit() -> UnitContext {
    UnitContext {
        unit_name: "infinidat-tools/0".to_string(),
        model_name: "openstack".to_string(),
    }
}

fn source(codename: &str) -> String {
    format!("deb https://repo.infinidat.com/packages/main-stable/apt/linux-ubuntu {codename} main")
}

#[test]
fn test_install_runs_full_sequence() {
    let mut host = FakeHost::new();
    let outcome = install(&mut host, &options(&source("{distrib_codename}"), Some(KEY)));

    assert_eq!(outcome, HookOutcome::Ok(None));
    assert_eq!(outcome.status(), UnitStatus::Active(None));
    assert_eq!(
        host.calls,
        vec![
            "add_source".to_string(),
            "update_index".to_string(),
            format!("install {}", PACKAGES.join(" ")),
            "settings_check auto_fix=true".to_string(),
            "update_multipath_conf restart=true".to_string(),
            "regenerate_initramfs".to_string(),
            "set_lvm_global_filter".to_string(),
        ]
    );
    assert_eq!(host.lvm_filters, vec!["[ \"r|.*|\" ]".to_string()]);
}

#[test]
fn test_repo_management_for_dynamic_and_static_sources() {
    for release in ["bionic", "focal", "jammy", "noble"] {
        for template in [source("{distrib_codename}"), source(release)] {
            let mut host = FakeHost::new();
            host.codename = release.to_string();

            install(&mut host, &options(&template, Some(KEY)));

            assert_eq!(host.sources, vec![(source(release), KEY.to_string())]);
        }
    }
}

#[test]
fn test_default_gpg_key_is_fetched() {
    let mut host = FakeHost::new();
    install(&mut host, &options(&source("focal"), None));
    assert_eq!(host.sources, vec![(source("focal"), DEFAULT_KEY.to_string())]);
}

#[test]
fn test_install_without_sources_skips_repository() {
    let mut host = FakeHost::new();
    let mut opts = options("", None);
    opts.install_sources = None;

    let outcome = install(&mut host, &opts);
    assert_eq!(outcome, HookOutcome::Ok(None));
    assert!(!host.called("add_source"));
    assert!(host.called("update_index"));
}

#[test]
fn test_nonzero_check_code_asks_for_review() {
    let mut host = FakeHost::new();
    host.check_code = 2;
    let outcome = install(&mut host, &options(&source("focal"), Some(KEY)));
    assert_eq!(outcome, HookOutcome::Ok(Some(INSTALL_REVIEW.to_string())));
    assert_eq!(
        outcome.status().to_string(),
        "active (review infinihost settings status)"
    );
}

#[test]
fn test_package_failure_blocks_and_retries() {
    let mut host = FakeHost::new();
    host.fail_install = true;

    let outcome = install(&mut host, &options(&source("focal"), Some(KEY)));

    assert!(outcome.needs_retry());
    assert_eq!(outcome.status(), UnitStatus::Blocked(INSTALL_FAILED.to_string()));
    assert!(!host.called("settings_check auto_fix=true"));
    assert!(!host.called("set_lvm_global_filter"));
}

#[test]
fn test_missing_infinihost_blocks_and_retries() {
    let mut host = FakeHost::new();
    host.infinihost_missing = true;

    let outcome = install(&mut host, &options(&source("focal"), Some(KEY)));

    assert_eq!(outcome, HookOutcome::NeedsRetry(INSTALL_FAILED.to_string()));
    assert!(!host.called("update_multipath_conf restart=true"));
}

#[test]
fn test_initramfs_failure_blocks_but_still_patches_lvm() {
    let mut host = FakeHost::new();
    host.fail_initramfs = true;

    let outcome = install(&mut host, &options(&source("focal"), Some(KEY)));

    assert_eq!(outcome, HookOutcome::Blocked(INITRD_FAILED.to_string()));
    assert!(!outcome.needs_retry());
    assert!(host.called("set_lvm_global_filter"));
}

#[test]
fn test_install_lvm_failure_blocks() {
    let mut host = FakeHost::new();
    host.fail_lvm = true;

    let outcome = install(&mut host, &options(&source("focal"), Some(KEY)));
    assert_eq!(outcome, HookOutcome::Blocked(LVM_FAILED.to_string()));
}

#[test]
fn test_config_changed_only_touches_lvm() {
    let mut host = FakeHost::new();
    let outcome = config_changed(&mut host, &options(&source("focal"), None));

    assert_eq!(outcome, HookOutcome::Ok(None));
    assert_eq!(host.calls, vec!["set_lvm_global_filter".to_string()]);
}

#[test]
fn test_config_changed_with_unset_filter_passes_empty_value() {
    let mut host = FakeHost::new();
    let mut opts = options(&source("focal"), None);
    opts.lvm_global_filter = None;

    config_changed(&mut host, &opts);
    assert_eq!(host.lvm_filters, vec![String::new()]);
}

#[test]
fn test_config_changed_failure_blocks_without_retry() {
    let mut host = FakeHost::new();
    host.fail_lvm = true;

    let outcome = config_changed(&mut host, &options(&source("focal"), None));
    assert_eq!(outcome, HookOutcome::Blocked(LVM_FAILED.to_string()));
    assert!(!outcome.needs_retry());
}

#[test]
fn test_update_status_requires_install_sources() {
    let mut opts = options(&source("focal"), None);
    assert_eq!(update_status(&opts), HookOutcome::Ok(None));

    opts.install_sources = Some(String::new());
    assert_eq!(
        update_status(&opts),
        HookOutcome::Blocked("Missing option(s): install_sources".to_string())
    );
}

#[test]
fn test_action_without_auto_fix() {
    let mut host = FakeHost::new();
    host.check_code = 1;
    let mut logs = Vec::new();

    let outcome = settings_check(&mut host, false, &unit(), &mut |m: &str| logs.push(m.to_string()));

    assert_eq!(
        outcome,
        ActionOutcome::Completed {
            result: "exit code=1\nsee 'juju ssh -m openstack infinidat-tools/0 cat /home/ubuntu/infinihost-results/infinihost-out-abc123' for more details".to_string()
        }
    );
    assert_eq!(logs, vec!["Running 'infinihost settings check'".to_string()]);
    assert!(!host.calls.iter().any(|c| c.starts_with("update_multipath_conf")));
}

#[test]
fn test_action_with_auto_fix_updates_multipath() {
    let mut host = FakeHost::new();
    let mut logs = Vec::new();

    let outcome = settings_check(&mut host, true, &unit(), &mut |m: &str| logs.push(m.to_string()));

    assert!(matches!(outcome, ActionOutcome::Completed { .. }));
    assert_eq!(
        host.calls,
        vec![
            "settings_check_report auto_fix=true".to_string(),
            "update_multipath_conf restart=true".to_string(),
        ]
    );
    assert_eq!(logs.len(), 2);
}

#[test]
fn test_action_fails_when_infinihost_missing() {
    let mut host = FakeHost::new();
    host.infinihost_missing = true;

    let outcome = settings_check(&mut host, true, &unit(), &mut |_: &str| {});

    match outcome {
        ActionOutcome::Failed { message } => {
            assert!(message.starts_with("Failed to run infinihost:"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!host.calls.iter().any(|c| c.starts_with("update_multipath_conf")));
}

#[test]
fn test_unit_status_display() {
    assert_eq!(UnitStatus::Active(None).to_string(), "active");
    assert_eq!(
        UnitStatus::Blocked("Installation failed".to_string()).to_string(),
        "blocked (Installation failed)"
    );
    assert_eq!(UnitStatus::Maintenance("x".to_string()).name(), "maintenance");
}
