use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn tgetopt(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tgetopt"));
    cmd.args(args).env_remove("POSIXLY_CORRECT").env_remove("RUST_LOG");
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run tgetopt")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn short_options_and_permutation() {
    let out = tgetopt(&["ab:", "-", "file1", "-a", "-bx", "file2"], &[]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "opt a\nopt b=x\ndone next=3\nargv: -a -bx file1 file2\n"
    );
    assert_eq!(stderr(&out), "");
}

#[test]
fn clustered_short_options() {
    let out = tgetopt(&["abc", "-", "-abc"], &[]);
    assert_eq!(stdout(&out), "opt a\nopt b\nopt c\ndone next=2\nargv: -abc\n");
}

#[test]
fn long_options() {
    let out = tgetopt(
        &["v", "output:,color::", "--output=foo", "--color", "-v", "--output", "bar"],
        &[],
    );
    assert_eq!(
        stdout(&out),
        "long output=foo\nlong color\nopt v\nlong output=bar\ndone next=6\n\
         argv: --output=foo --color -v --output bar\n"
    );
}

#[test]
fn diagnostics_go_to_stderr() {
    let out = tgetopt(&["a", "output:", "-z", "--bogus", "--output"], &[]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "unrecognized z\nunrecognized ?\nunrecognized o\ndone next=4\n\
         argv: -z --bogus --output\n"
    );
    assert_eq!(
        stderr(&out),
        "tgetopt: unrecognised option 'z'\n\
         tgetopt: unrecognised option '--bogus'\n\
         tgetopt: option '--output' requires an argument\n"
    );
}

#[test]
fn quiet_suppresses_diagnostics() {
    let out = tgetopt(&["-q", "a", "-", "-z"], &[]);
    assert_eq!(stdout(&out), "unrecognized z\ndone next=2\nargv: -z\n");
    assert_eq!(stderr(&out), "");
}

#[test]
fn colon_mode_reports_missing_argument() {
    let out = tgetopt(&[":c:", "-", "-x", "-c"], &[]);
    assert_eq!(
        stdout(&out),
        "unrecognized x\nmissing c\ndone next=3\nargv: -x -c\n"
    );
    assert_eq!(stderr(&out), "");
}

#[test]
fn return_in_order_mode() {
    let out = tgetopt(&["--", "-a", "-", "x", "-a", "y"], &[]);
    assert_eq!(
        stdout(&out),
        "nonopt x\nopt a\nnonopt y\ndone next=4\nargv: x -a y\n"
    );
}

#[test]
fn double_dash_stops_scanning() {
    let out = tgetopt(&["a", "-", "-a", "--", "-a"], &[]);
    assert_eq!(stdout(&out), "opt a\ndone next=3\nargv: -a -- -a\n");
}

#[test]
fn posixly_correct_from_environment() {
    let out = tgetopt(&["a", "-", "x", "-a"], &[("POSIXLY_CORRECT", "1")]);
    assert_eq!(stdout(&out), "done next=1\nargv: x -a\n");
}

#[test]
fn posix_flag() {
    let out = tgetopt(&["--posix", "a", "-", "x", "-a"], &[]);
    assert_eq!(stdout(&out), "done next=1\nargv: x -a\n");
}

#[test]
fn bad_optstring_exits_with_error() {
    let out = tgetopt(&["a?", "-", "-a"], &[]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(stdout(&out), "");
    assert!(stderr(&out).starts_with("tgetopt: invalid option string \"a?\""));
}

#[test]
fn help_lists_runner_options() {
    let out = tgetopt(&["--help"], &[]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("Usage: tgetopt [OPTION]... OPTSTRING LONGSPECS [ARG]...\n"));
    assert!(text.contains("  -q, --quiet"));
    assert!(text.contains("  -p, --posix"));
}

#[test]
fn missing_operands_is_a_usage_error() {
    let out = tgetopt(&["ab"], &[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).starts_with("Usage: tgetopt"));
}
