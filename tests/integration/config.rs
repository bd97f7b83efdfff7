use std::io::BufReader;

use slotdesk::config::Config;
use slotdesk::prompter::flows::config_edit::ConfigEditFlow;
use slotdesk::prompter::prompter::Prompter;

use crate::common::{
    build_context, free_run, make_temp_dir, normalized_lines, read_log_contents, run_with_input,
    write_valid_config,
};

#[test]
fn main_allows_running_config_command() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);

    let output = run_with_input(&dir, "config\nN\nexit\n");
    assert!(output.status.success(), "config run should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("CONFIG"),
        "stdout did not include CONFIG table"
    );
    assert!(stdout.contains("UNIT_PRICE"), "{stdout}");
}

#[test]
fn config_edit_persists_unit_price_change() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    let flow = ConfigEditFlow::new(&mut ctx);
    let input = b"Y\n0\n2000\nN\n";
    let reader = BufReader::new(&input[..]);
    Prompter::new()
        .run_with_reader(flow, false, reader)
        .expect("config flow should run");

    assert_eq!(ctx.quotes.unit_price(), 2000, "quotes should use the new price");
    let cfg = Config::load_from(dir.join("config.json")).expect("config should reload");
    assert_eq!(cfg.unit_price(), 2000, "price should persist to disk");

    let log_text = read_log_contents(&dir).expect("log file should exist");
    assert!(
        log_text.contains("Config 'UNIT_PRICE' updated: '1500' -> '2000'"),
        "{log_text}"
    );
}

#[test]
fn rejected_config_value_keeps_previous_one() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    let flow = ConfigEditFlow::new(&mut ctx);
    let input = b"Y\n0\n0\nabc\nN\n";
    Prompter::new()
        .run_with_reader(flow, false, BufReader::new(&input[..]))
        .expect("config flow should run");

    assert_eq!(ctx.config.unit_price(), 1500);
    let cfg = Config::load_from(dir.join("config.json")).expect("config should reload");
    assert_eq!(cfg.unit_price(), 1500);
}

#[test]
fn price_change_applies_to_next_quote_in_same_session() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);
    let ctx = build_context(&dir);
    let slot = free_run(&ctx, 1)[0];
    drop(ctx);

    let input = format!(
        "config\nY\n0\n2500\nN\ntoggle {slot}\nsubmit\nname probe\ntype print\nquote\ncancel\nback\nexit\n"
    );
    let output = run_with_input(&dir, &input);
    assert!(output.status.success(), "session should complete");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("approx. 2500 KRW"), "quote should use new price:\n{stdout}");
    let stdout_lines = normalized_lines(&output.stdout);
    assert!(stdout_lines.iter().any(|l| l.contains("Updated UNIT_PRICE.")));
}
