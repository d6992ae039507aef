use std::{fs::File, io::Write, path::PathBuf};

use strip_ansi_escapes::strip;
use tracing::{error, info};

use crate::prelude::*;
use crate::run_output::GoalRunOutput;

pub fn dump_logs_to_temporary_file(output: &GoalRunOutput) -> Result<()> {
    match create_temp_and_dump(output) {
        Ok(path) => {
            info!("Logs written to temporary file: {:?}", path);
        }
        Err(e) => {
            error!("Failed to create temporary file and dump logs: {}", e);
        }
    }
    Ok(())
}

fn strip_ansi_codes(input: &str) -> String {
    String::from_utf8_lossy(&strip(input.as_bytes())).to_string()
}

pub fn create_temp_and_dump(output: &GoalRunOutput) -> Result<PathBuf> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let filename = format!("sdm_logs_{}.txt", timestamp);
    let path = PathBuf::from(&filename);
    let mut file = File::create(&path)?;
    dump_logs_internal(output, &mut file, true)?;
    Ok(path)
}

pub fn dump_logs<W: Write>(output: &GoalRunOutput, writer: W) -> Result<()> {
    dump_logs_internal(output, writer, false)
}

fn dump_logs_internal<W: Write>(
    output: &GoalRunOutput,
    mut writer: W,
    strip_ansi: bool,
) -> Result<()> {
    for goal in output.config.goals.iter() {
        if let Some(chunks) = output.logs.get(&goal.id) {
            writeln!(writer, "========================")?;
            writeln!(writer, "Log output for goal {}", goal.name)?;
            writeln!(writer, "========================")?;

            if strip_ansi {
                for chunk in chunks {
                    write!(writer, "{}", strip_ansi_codes(chunk))?;
                }
            } else {
                for chunk in chunks {
                    write!(writer, "{}", chunk)?;
                }
            }

            writeln!(writer)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use sdm_config::{SdmConfig, SdmUserConfig};

    use super::*;

    fn config_with_one_goal() -> SdmConfig {
        let user = SdmUserConfig::from_toml(
            r#"
            [global]
            version = "1.0.0"

            [[goals]]
            name = "colorful"

            [[goals.commands]]
            line = "echo red"
        "#,
        )
        .unwrap();
        SdmConfig::from_user_config(user).unwrap()
    }

    #[test]
    fn dump_keeps_ansi_by_default() {
        let config = config_with_one_goal();
        let mut output = GoalRunOutput::new(&config);
        output
            .logs
            .insert(config.goals[0].id, vec![String::from("\x1b[31mred\x1b[0m\n")]);

        let mut buffer = Vec::new();
        dump_logs(&output, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Log output for goal colorful"));
        assert!(text.contains("\x1b[31m"));
    }

    #[test]
    fn dump_strips_ansi_when_requested() {
        let config = config_with_one_goal();
        let mut output = GoalRunOutput::new(&config);
        output
            .logs
            .insert(config.goals[0].id, vec![String::from("\x1b[31mred\x1b[0m\n")]);

        let mut buffer = Vec::new();
        dump_logs_internal(&output, &mut buffer, true).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("red"));
        assert!(!text.contains('\x1b'));
    }
}
