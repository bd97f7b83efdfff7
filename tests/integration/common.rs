use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

pub use slotdesk::arg::arg_parse_strategy::CommandArgParser;
pub use slotdesk::command::command_parser::CommandParser;
use slotdesk::core::context::AppContext;
use slotdesk::core::slot_clock::SLOTS_PER_DAY;
use slotdesk::core::types::SlotIndex;

pub const SEED: u64 = 7;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_slotdesk"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "slotdesk-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_config(dir: &PathBuf, file_logging: &str) {
    let cfg = format!(
        r#"{{
      "unit_price": {{ "value": 1500, "description": "Price per slot" }},
      "quote_delay_ms": {{ "value": 0, "description": "Quote delay" }},
      "requester": {{ "value": "Han Jungyo", "description": "Requester" }},
      "random_seed": {{ "value": {SEED}, "description": "Seed" }},
      "file_logging_enabled": {{ "value": "{file_logging}", "description": "file logging" }}
    }}"#
    );
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn write_valid_config(dir: &PathBuf) {
    write_config(dir, "True");
}

pub fn run_with_input(dir: &PathBuf, input: &str) -> Output {
    let mut child = Command::new(binary_path())
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

pub fn run_without_input(dir: &PathBuf) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary")
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut bytes = s.bytes().peekable();

    while let Some(b) = bytes.next() {
        if b == 0x1B {
            if matches!(bytes.peek(), Some(b'[')) {
                let _ = bytes.next();
                while let Some(nb) = bytes.next() {
                    if (nb as char).is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
        }

        if b.is_ascii_control() {
            continue;
        }

        out.push(b as char);
    }

    out
}

/// Output lines without colors or prompt prefixes, blank lines dropped.
pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| {
            let stripped = strip_ansi_and_control(l);
            let mut trimmed = stripped.trim();
            for prompt in ["submit>", "quote>", ">"] {
                if let Some(rest) = trimmed.strip_prefix(prompt) {
                    trimmed = rest.trim();
                    break;
                }
            }
            trimmed.to_string()
        })
        .filter(|l| !l.is_empty())
        .collect()
}

/// Same session state the binary starts with when run from `dir`.
pub fn build_context(dir: &PathBuf) -> AppContext {
    AppContext::new_with_paths(dir.join("config.json"), dir.join("logs"))
        .expect("context should build")
}

/// First `count` consecutive free slots on the active day.
pub fn free_run(ctx: &AppContext, count: usize) -> Vec<SlotIndex> {
    let date = ctx.active_date();
    let all: Vec<SlotIndex> = SlotIndex::all().collect();
    all.windows(count)
        .find(|w| w.iter().all(|s| !ctx.reservations.is_reserved(date, *s)))
        .map(|w| w.to_vec())
        .unwrap_or_else(|| panic!("no {count} free slots among {SLOTS_PER_DAY}"))
}

pub fn first_reserved(ctx: &AppContext) -> SlotIndex {
    let date = ctx.active_date();
    *ctx.reservations
        .reserved_slots(date)
        .iter()
        .next()
        .expect("seeded day should have reservations")
}

pub fn execute_command(
    line: &str,
    arg_parser: &CommandArgParser,
    command_parser: &CommandParser,
    ctx: &mut AppContext,
) -> slotdesk::errors::Result<()> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let raw_args: Vec<String> = parts.map(|s| s.to_string()).collect();

    let args = arg_parser.parse(command, &raw_args)?;
    let cmd = command_parser.parse(command, &args)?;
    cmd.execute(ctx)
}

pub fn read_log_contents(dir: &PathBuf) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
