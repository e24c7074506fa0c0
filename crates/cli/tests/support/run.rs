use std::{net::TcpListener, process::Command};

/// Runs the binary with a clean environment so `CONNPROBE_*` variables from the
/// caller cannot leak into the settings under test.
#[allow(dead_code)]
pub fn run_connprobe(args: &[&str]) -> std::process::Output {
    run_connprobe_with_env(args, &[])
}

pub fn run_connprobe_with_env(args: &[&str], envs: &[(&str, &str)]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_connprobe"))
        .args(args)
        .env_clear()
        .envs(envs.iter().copied())
        .output()
        .unwrap_or_else(|error| panic!("failed to run connprobe: {error}"))
}

#[allow(dead_code)]
pub fn closed_local_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|error| panic!("failed to bind ephemeral port: {error}"));
    let port = listener
        .local_addr()
        .unwrap_or_else(|error| panic!("failed to read ephemeral port: {error}"))
        .port();
    drop(listener);
    port
}
