//! Drives the compiled binary over stdin/stdout the way a GUI would,
//! instead of calling the search/UCI-handling functions directly.

use assert_cmd::Command;

#[test]
fn uci_handshake_and_go_depth_two() {
    let mut cmd = Command::cargo_bin("vantage").expect("vantage binary builds");
    cmd.write_stdin("uci\nisready\nposition startpos moves e2e4 e7e5\ngo depth 2\nquit\n");

    let output = cmd.output().expect("vantage runs to completion");
    assert!(output.status.success(), "vantage should exit cleanly on quit");

    let stdout = String::from_utf8(output.stdout).expect("stdout is valid utf8");
    let lines: Vec<&str> = stdout.lines().collect();

    assert!(
        lines.iter().any(|l| l.starts_with("id name")),
        "missing 'id name' line:\n{stdout}"
    );
    assert!(lines.contains(&"uciok"), "missing 'uciok' line:\n{stdout}");
    assert!(lines.contains(&"readyok"), "missing 'readyok' line:\n{stdout}");
    assert!(
        lines.iter().any(|l| l.starts_with("info depth 2")),
        "missing 'info depth 2' line:\n{stdout}"
    );
    assert!(
        lines.iter().any(|l| l.starts_with("bestmove")),
        "missing 'bestmove' line:\n{stdout}"
    );
}
