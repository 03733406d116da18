//! Integration test suite for the `jl` CLI
use assert_cmd::Command;

/// Helper function to run the `jl` binary with the given arguments and return
/// a [`assert_cmd::assert::Assert`].
fn run_main(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("jl").expect("Failed to find main binary");
    cmd.args(args);
    cmd.assert()
}

/// Run `jl` with `stdin` piped in.
fn run_with_stdin(args: &[&str], stdin: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("jl").expect("Failed to find main binary");
    cmd.args(args).write_stdin(stdin);
    cmd.assert()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone())
        .expect("Invalid UTF-8 output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;

    #[test]
    fn nonexistent_file() {
        run_main(&["does/not/exist.json"]).failure().code(1);
    }

    #[test]
    fn simple_file() {
        let assert = run_main(&["tests/data/simple.json"]).success().code(0);
        let output = stdout_of(&assert);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.first(), Some(&"Token(Kind_OpenBrace, '{', 1:0)"));
        assert_eq!(lines.get(1), Some(&"Token(Kind_String, '\"name\"', 2:2)"));
        assert!(lines.contains(&"Token(Kind_Number, '32', 3:9)"));
        assert!(lines.contains(&"Token(Kind_Null, 'null', 6:13)"));
        assert_eq!(lines.last(), Some(&"Token(Kind_EndOfText, '', 8:0)"));
    }

    #[test]
    fn invalid_file_reports_errors() {
        let assert = run_main(&["tests/data/invalid.json"]).failure().code(1);
        let output = stdout_of(&assert);
        assert!(output.contains(
            "Token(Kind_Error, 'truee', 1:16, cause='Unexpected name token, \
             expected true, null or false.')"
        ));
        // scanning continued after the error
        assert!(output.contains("Token(Kind_CloseBrace, '}', 1:21)"));
        assert!(output.trim_end().ends_with("Token(Kind_EndOfText, '', 2:0)"));
    }

    #[test]
    fn fail_fast_stops_at_first_error() {
        let assert = run_with_stdin(&["--fail-fast"], "[1, @, 2]").failure();
        let output = stdout_of(&assert);
        let last = output.lines().last().expect("at least one token");
        assert_eq!(
            last,
            "Token(Kind_Error, '@', 1:4, cause='Unexpected character.')"
        );
    }

    #[test]
    fn stream_path_is_buffered() {
        // /dev/stdin is a pipe here, which cannot be memory-mapped
        let assert = run_with_stdin(&["/dev/stdin"], "[1,\n true]").success();
        assert_eq!(
            stdout_of(&assert),
            "Token(Kind_OpenBracket, '[', 1:0)\n\
             Token(Kind_Number, '1', 1:1)\n\
             Token(Kind_Comma, ',', 1:2)\n\
             Token(Kind_True, 'true', 2:1)\n\
             Token(Kind_CloseBracket, ']', 2:5)\n\
             Token(Kind_EndOfText, '', 2:6)\n"
        );
    }

    #[test]
    fn json_lines_output() {
        let assert = run_with_stdin(&["--json"], "[true]").success();
        let output = stdout_of(&assert);
        let values: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid JSON line"))
            .collect();

        assert_eq!(values.len(), 4);
        assert_eq!(values[1]["kind"], "True");
        assert_eq!(values[1]["content"], "true");
        assert_eq!(values[1]["location"]["column"], 1);
        assert_eq!(values[3]["kind"], "EndOfText");
        assert!(values.iter().all(|v| v["error"].is_null()));
    }

    #[test]
    fn count_summary() {
        let assert = run_with_stdin(&["--count"], "{\"a\": .}").failure();
        let stderr = String::from_utf8(assert.get_output().stderr.clone())
            .expect("Invalid UTF-8 output");
        // EndOfText is counted too
        assert!(stderr.contains("Tokens: 6, errors: 1"), "got {stderr:?}");
    }

    #[test]
    fn non_utf8_file_fails() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&[b'"', 0xff, 0xfe, b'"']).expect("write temp file");
        let path = file.path().to_str().expect("utf-8 temp path");
        run_main(&[path]).failure().code(1);
    }

    #[test]
    fn empty_file() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let path = file.path().to_str().expect("utf-8 temp path");
        let assert = run_main(&[path]).success();
        assert_eq!(stdout_of(&assert), "Token(Kind_EndOfText, '', 1:0)\n");
    }

    #[test]
    fn generate_man_pages() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().to_str().expect("utf-8 temp path");
        run_main(&["generate", "man", "-o", out]).success();
        assert!(dir.path().join("jl.1").exists());
        assert!(dir.path().join("jl-generate.1").exists());
        assert!(dir.path().join("jl-generate-shell.1").exists());
    }
}
