use slotdesk::core::models::JobId;
use slotdesk::errors::Error;

use crate::common::{
    CommandArgParser, CommandParser, build_context, execute_command, first_reserved, free_run,
    make_temp_dir, normalized_lines, read_log_contents, run_with_input, write_config,
    write_valid_config,
};

#[test]
fn unknown_command_reports_error_and_continues() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "frobnicate\nqueue\nexit\n");

    assert!(output.status.success());
    let stderr_lines = normalized_lines(&output.stderr);
    let expected = "Command resolution failed for 'frobnicate'. Unknown command: frobnicate";
    assert!(
        stderr_lines.iter().any(|line| line == expected),
        "stderr did not include expected error. stderr was: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Job queue"), "queue should still render:\n{stdout}");
}

#[test]
fn startup_prints_dashboard_with_fixture_queue() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "exit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for needle in ["Usage", "(usage)", "Job queue", "#2043", "thermal-sim-batch"] {
        assert!(stdout.contains(needle), "missing '{needle}' in:\n{stdout}");
    }
}

#[test]
fn man_command_prints_general_manual() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "man\nexit\n");

    assert!(output.status.success());
    let stdout_lines = normalized_lines(&output.stdout);
    assert!(stdout_lines.iter().any(|line| line == "NAME"));
    assert!(
        stdout_lines
            .iter()
            .any(|line| line == "slotdesk - Half-hour bookings and a job queue.")
    );
}

#[test]
fn man_command_prints_toggle_manual() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "man toggle\nexit\n");

    assert!(output.status.success());
    let stdout_lines = normalized_lines(&output.stdout);
    assert!(stdout_lines.iter().any(|line| line == "toggle <first>-<last>"));
}

#[test]
fn dates_help_flag_prints_usage() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "dates -h\nexit\n");

    assert!(output.status.success());
    let stdout_lines = normalized_lines(&output.stdout);
    let expected = "Usage: dates        # Bookable days; * marks the active one";
    assert!(
        stdout_lines.iter().any(|l| l == expected),
        "stdout did not include dates usage:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn submit_flow_over_stdin_queues_job() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let ctx = build_context(&dir);
    let run = free_run(&ctx, 2);
    let reserved_before = ctx.reservations.reserved_count(ctx.active_date());
    drop(ctx);

    let input = format!(
        "toggle {}-{}\nsubmit\nname \"nightly build\"\ntype render\nurgency low\nquote\nconfirm\nqueue\nexit\n",
        run[0],
        run[1]
    );
    let output = run_with_input(&dir, &input);
    assert!(output.status.success(), "session should complete");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("approx. 3000 KRW"), "quote missing:\n{stdout}");
    let stdout_lines = normalized_lines(&output.stdout);
    let queued_at = stdout_lines
        .iter()
        .position(|l| l.starts_with("Queued #2044 'nightly build'"))
        .unwrap_or_else(|| panic!("stdout did not include queued job:\n{stdout}"));

    // Both the usage grid and the booking grid are redrawn with the new reservations.
    let after = &stdout_lines[queued_at..];
    for slot in &run {
        let n = slot.get() as usize;
        let band = format!("{:02}:00", (n / 8) * 4);
        let cells: Vec<Vec<&str>> = after
            .iter()
            .filter(|l| l.starts_with(&band))
            .map(|l| l.split_whitespace().skip(1).collect())
            .collect();
        assert!(cells.len() >= 2, "expected usage and booking rows for {band}:\n{stdout}");
        assert!(
            cells.iter().all(|row| row.get(n % 8) == Some(&"--")),
            "slot {n} should print as reserved after confirm: {cells:?}"
        );
    }
    let reserved_line = format!("Reserved: {}  Available:", reserved_before + 2);
    assert!(
        after.iter().filter(|l| l.starts_with(&reserved_line)).count() >= 2,
        "grid counts should include the committed slots:\n{stdout}"
    );

    let log_text = read_log_contents(&dir).expect("log file should exist");
    assert!(log_text.contains("Queued #2044 'nightly build'"), "{log_text}");
}

#[test]
fn toggling_reserved_slot_warns_and_continues() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let ctx = build_context(&dir);
    let taken = first_reserved(&ctx);
    drop(ctx);

    let output = run_with_input(&dir, &format!("toggle {taken}\nclear\nexit\n"));
    assert!(output.status.success());

    let stderr_lines = normalized_lines(&output.stderr);
    assert!(
        stderr_lines
            .iter()
            .any(|l| l.starts_with(&format!("Slot(s) {taken} on ")) && l.contains("Please re-select.")),
        "stderr should explain the rejected click: {stderr_lines:?}"
    );
    let stdout_lines = normalized_lines(&output.stdout);
    assert!(stdout_lines.iter().any(|l| l == "Cleared 0 selected slot(s)."));
}

#[test]
fn argument_errors_do_not_stop_followup_command() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "queue 3\nshow\nshow #2041\nexit\n");
    assert!(output.status.success(), "session should complete");

    let stderr_lines = normalized_lines(&output.stderr);
    assert!(
        stderr_lines
            .iter()
            .any(|l| l.contains("This command takes no arguments.")),
        "{stderr_lines:?}"
    );
    assert!(
        stderr_lines.iter().any(|l| l.contains("Missing job id.")),
        "{stderr_lines:?}"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[vision-model-train] Job progress"), "{stdout}");
    assert!(stdout.contains("65%"), "{stdout}");
}

#[test]
fn commands_drive_selection_and_dates_through_library() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let arg_parser = CommandArgParser::new();
    let command_parser = CommandParser::new();
    let mut ctx = build_context(&dir);

    let run = free_run(&ctx, 3);
    let line = format!("toggle {}-{}", run[0], run[2]);
    execute_command(&line, &arg_parser, &command_parser, &mut ctx).unwrap();
    assert_eq!(ctx.selection.slots(), run.as_slice());

    execute_command("date 0", &arg_parser, &command_parser, &mut ctx).unwrap();
    assert_eq!(ctx.selection.len(), 3, "same day keeps the selection");

    execute_command("date 3", &arg_parser, &command_parser, &mut ctx).unwrap();
    assert!(ctx.selection.is_empty());
    assert_eq!(ctx.dates.active_index(), 3);

    let err = execute_command("date 9", &arg_parser, &command_parser, &mut ctx).unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "unexpected error: {err:?}");
    assert_eq!(ctx.dates.active_index(), 3);
}

#[test]
fn show_reports_missing_job() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let arg_parser = CommandArgParser::new();
    let command_parser = CommandParser::new();
    let mut ctx = build_context(&dir);

    execute_command("#2042", &arg_parser, &command_parser, &mut ctx).unwrap();
    let err = execute_command("show 9999", &arg_parser, &command_parser, &mut ctx).unwrap_err();
    assert!(matches!(err, Error::JobNotFound(9999)));
    assert!(ctx.queue.get(JobId(2042)).is_ok());
}

#[test]
fn log_command_without_log_file_prints_no_logs() {
    let dir = make_temp_dir("command");
    write_config(&dir, "False");
    let output = run_with_input(&dir, "log\nexit\n");
    assert!(output.status.success(), "log command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No logs"),
        "stdout should indicate missing logs:\n{stdout}"
    );
    assert!(
        !dir.join("logs").exists(),
        "log command should not create a log file when none existed"
    );
}

#[test]
fn log_command_prints_session_log_without_logging_itself() {
    let dir = make_temp_dir("command");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "clear\nlog\nexit\n");
    assert!(output.status.success(), "session should complete");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("[20"),
        "stdout should include printed log file contents:\n{stdout}"
    );
    let log_text =
        read_log_contents(&dir).expect("log file should exist after running a logging command");
    assert!(
        !log_text.contains("Command run: log"),
        "log file should not contain the log command itself:\n{log_text}"
    );
    assert!(log_text.contains("Command run: clear"), "{log_text}");
    assert!(log_text.contains("Seeded "), "{log_text}");
}
