//! CLI integration tests for `zzz sig`, `zzz keyfile` and `zzz config`.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still works

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ZERO_DIGEST: &str = "a7f4700b4185134dc04b616831674a681f22fc24059ef5972f58f5012b650888";
const KEY_ONE_ZERO_SIGNATURE: &str = "53d6ffb1b92c571f054e8d97aa59f2559301258f51719cc3fe9cb977048f61fb1377e9fd630450cd97fdb2a041950253e9feaf3775f706358dc4530c8206f6021b";
const KEY_TWO_ZERO_SIGNATURE: &str = "fe861fd7dde8350602840b6f6ddcc18d977639ac03e7d8b859fb90ffaa6941713ca7450094d9427a224efa6be7990a0a0bc88e5a5fe9dfbdaa733f2dfa15e4431b";
const KEY_ONE_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
const KEY_TWO_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
const FIXTURE_PASSPHRASE: &str = "zigzagzog-test";

fn zzz(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zzz").unwrap();
    cmd.env_remove("ZZZ_HOME")
        .env_remove("RUST_LOG")
        .arg("--home")
        .arg(home);
    cmd
}

fn fixture_keystore() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../crypto/tests/fixtures/light-keystore.json")
}

fn write_secret(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Create a light keystore for private key 1
fn create_key_one(temp_dir: &TempDir) -> PathBuf {
    let keyfile = temp_dir.path().join("key-one.json");
    let pk = write_secret(temp_dir.path(), "pk.txt", &format!("0x{}\n", "0".repeat(63) + "1"));
    let pw = write_secret(temp_dir.path(), "pw.txt", "correct horse\n");

    zzz(temp_dir.path())
        .args(["keyfile", "create", "--light-kdf", "--outfile"])
        .arg(&keyfile)
        .arg("--private-key-file")
        .arg(&pk)
        .arg("--password-file")
        .arg(&pw)
        .assert()
        .success()
        .stdout(predicate::str::contains(KEY_ONE_ADDRESS));

    keyfile
}

#[test]
fn test_hash_defaults() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .args(["sig", "hash"])
        .assert()
        .success()
        .stdout(format!("{}\n", ZERO_DIGEST));
}

#[test]
fn test_hash_json_output() {
    let temp_dir = TempDir::new().unwrap();

    let output = zzz(temp_dir.path())
        .args(["sig", "hash", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["digest"], ZERO_DIGEST);
    assert_eq!(json["chainId"], 1);
    assert_eq!(json["nonce"], "0");
}

#[test]
fn test_hash_changes_with_chain_id() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .args(["sig", "hash", "--chain-id", "42161"])
        .assert()
        .success()
        .stdout(predicate::str::contains(ZERO_DIGEST).not());
}

#[test]
fn test_hash_rejects_bad_input() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .args(["sig", "hash", "--nonce", "12a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    zzz(temp_dir.path())
        .args(["sig", "hash", "--zzz", "0x1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_sign_with_foreign_keystore() {
    let temp_dir = TempDir::new().unwrap();
    let pw = write_secret(temp_dir.path(), "pw.txt", FIXTURE_PASSPHRASE);

    zzz(temp_dir.path())
        .args(["sig", "sign", "--keyfile"])
        .arg(fixture_keystore())
        .arg("--password-file")
        .arg(&pw)
        .assert()
        .success()
        .stdout(format!("{}\n", KEY_TWO_ZERO_SIGNATURE));
}

#[test]
fn test_sign_wrong_passphrase() {
    let temp_dir = TempDir::new().unwrap();
    let pw = write_secret(temp_dir.path(), "pw.txt", "not-the-passphrase");

    zzz(temp_dir.path())
        .args(["sig", "sign", "--keyfile"])
        .arg(fixture_keystore())
        .arg("--password-file")
        .arg(&pw)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("not-the-passphrase").not());
}

#[test]
fn test_sign_requires_keyfile() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .args(["sig", "sign"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--keyfile"));
}

#[test]
fn test_create_sign_verify_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let keyfile = create_key_one(&temp_dir);
    let pw = temp_dir.path().join("pw.txt");

    zzz(temp_dir.path())
        .args(["sig", "sign", "--keyfile"])
        .arg(&keyfile)
        .arg("--password-file")
        .arg(&pw)
        .assert()
        .success()
        .stdout(format!("{}\n", KEY_ONE_ZERO_SIGNATURE));

    zzz(temp_dir.path())
        .args(["sig", "verify", "--sig", KEY_ONE_ZERO_SIGNATURE])
        .assert()
        .success()
        .stdout(format!("{}\n", KEY_ONE_ADDRESS));
}

#[test]
fn test_keyfile_inspect() {
    let temp_dir = TempDir::new().unwrap();

    let output = zzz(temp_dir.path())
        .args(["keyfile", "inspect", "--output", "json", "--keyfile"])
        .arg(fixture_keystore())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["address"], KEY_TWO_ADDRESS);
    assert_eq!(json["kdf"]["n"], 4096);
}

#[test]
fn test_keyfile_create_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let keyfile = create_key_one(&temp_dir);
    let before = std::fs::read(&keyfile).unwrap();

    zzz(temp_dir.path())
        .args(["keyfile", "create", "--light-kdf", "--generate", "--outfile"])
        .arg(&keyfile)
        .arg("--password-file")
        .arg(temp_dir.path().join("pw.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read(&keyfile).unwrap(), before);
}

#[test]
fn test_keyfile_create_generate() {
    let temp_dir = TempDir::new().unwrap();
    let keyfile = temp_dir.path().join("fresh.json");
    let pw = write_secret(temp_dir.path(), "pw.txt", "fresh passphrase");

    zzz(temp_dir.path())
        .args(["keyfile", "create", "--light-kdf", "--generate", "--outfile"])
        .arg(&keyfile)
        .arg("--password-file")
        .arg(&pw)
        .assert()
        .success()
        .stdout(predicate::str::contains("Address:"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&keyfile).unwrap()).unwrap();
    assert_eq!(json["version"], 3);
    assert_eq!(json["crypto"]["kdf"], "scrypt");
}

#[test]
fn test_verify_expected_address() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .args(["sig", "verify", "--sig", KEY_ONE_ZERO_SIGNATURE, "--expected", KEY_ONE_ADDRESS])
        .assert()
        .success();

    zzz(temp_dir.path())
        .args(["sig", "verify", "--sig", KEY_ONE_ZERO_SIGNATURE, "--expected", KEY_TWO_ADDRESS])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected"));
}

#[test]
fn test_verify_rejects_canonical_v() {
    let temp_dir = TempDir::new().unwrap();
    let canonical = format!("{}00", &KEY_ONE_ZERO_SIGNATURE[..128]);

    zzz(temp_dir.path())
        .args(["sig", "verify", "--sig", &canonical])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_verify_rejects_short_signature() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .args(["sig", "verify", "--sig", &KEY_ONE_ZERO_SIGNATURE[..128]])
        .assert()
        .failure();
}

#[test]
fn test_config_init_sets_defaults() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .args(["config", "init", "--chain-id", "42161"])
        .assert()
        .success();

    assert!(temp_dir.path().join("config/client.toml").exists());

    zzz(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chain-id = 42161"));

    zzz(temp_dir.path())
        .args(["sig", "hash"])
        .assert()
        .success()
        .stdout(predicate::str::contains(ZERO_DIGEST).not());

    zzz(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--overwrite"));
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().unwrap();

    zzz(temp_dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("ZigZagZog"));
}
