//! Build script for ledpanel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time
//! - Embeds the build date reported by the VERSION command

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Must match `MAX_PIXELS` in src/main.rs
const FIRMWARE_MAX_PIXELS: i64 = 512;

fn main() {
    setup_linker();
    validate_config();
    embed_build_date();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml configuration file.          ║\n\
            ║  Please create one in the ledpanel-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let errors = validate_sections(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in panel.toml                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Allowed keys per section with their inclusive range
const SCHEMA: &[(&str, &[(&str, i64, i64)])] = &[
    ("serial", &[("baudrate", 1, u32::MAX as i64)]),
    (
        "strip",
        &[
            ("max_pixels", 1, FIRMWARE_MAX_PIXELS),
            ("spi_frequency_hz", 1, 25_000_000),
        ],
    ),
    ("latch", &[("timeout_ms", 0, u32::MAX as i64)]),
];

/// Check section names, key names, types and ranges
fn validate_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        errors.push("Top level must be a table".to_string());
        return errors;
    };

    for (section, value) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| name == section) else {
            errors.push(format!("Unknown section [{}]", section));
            continue;
        };

        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a section", section));
            continue;
        };

        for (key, value) in table {
            let Some(&(_, min, max)) = keys.iter().find(|(name, _, _)| name == key) else {
                errors.push(format!("Unknown key {}.{}", section, key));
                continue;
            };

            match value.as_integer() {
                Some(n) if (min..=max).contains(&n) => {}
                Some(n) => errors.push(format!(
                    "{}.{} = {} (allowed {}..={})",
                    section, key, n, min, max
                )),
                None => errors.push(format!("{}.{} must be an integer", section, key)),
            }
        }
    }

    errors
}

/// Export LEDPANEL_BUILD_DATE (UTC, YYYY-MM-DD)
///
/// Honors SOURCE_DATE_EPOCH for reproducible builds.
fn embed_build_date() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let now = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .unwrap_or_else(OffsetDateTime::now_utc);

    let date = now
        .format(&Rfc3339)
        .ok()
        .and_then(|s| s.get(..10).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=LEDPANEL_BUILD_DATE={}", date);
}
