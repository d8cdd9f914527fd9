//! Launch-at-login registration.
//!
//! Every platform starts the app with [`BACKGROUND_FLAG`] so it comes up in the
//! tray without showing the main window. Registration is rewritten on every
//! launch, which also repairs entries left pointing at an old executable.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::bootstrap::BACKGROUND_FLAG;

#[derive(Debug, Error)]
pub enum AutostartError {
    #[error("could not determine the executable path")]
    ExePath,
    #[error("could not determine the {0} directory")]
    NoDir(&'static str),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[cfg(target_os = "windows")]
    #[error("failed to update the Run registry key: {0}")]
    Registry(#[source] io::Error),
}

/// Windows `Run` value: quoted executable path followed by the background flag.
pub fn run_command_line(exe: &str) -> String {
    format!("\"{exe}\" {BACKGROUND_FLAG}")
}

/// XDG autostart entry launching `exe` in the background.
pub fn desktop_entry(exe: &str) -> String {
    [
        "[Desktop Entry]".to_string(),
        "Type=Application".to_string(),
        "Name=Neck Protector".to_string(),
        "Comment=Reminds you to stretch your neck".to_string(),
        format!("Exec=\"{exe}\" {BACKGROUND_FLAG}"),
        "Icon=neck-protector".to_string(),
        "Terminal=false".to_string(),
        "Categories=Utility;".to_string(),
        "X-GNOME-Autostart-enabled=true".to_string(),
    ]
    .join("\n")
        + "\n"
}

/// LaunchAgent plist running `program_args` once at login.
pub fn launch_agent_plist(label: &str, program_args: &[String]) -> String {
    let mut plist = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
        "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
        "<plist version=\"1.0\">\n",
        "<dict>\n",
    ));
    plist.push_str(&format!(
        "    <key>Label</key>\n    <string>{}</string>\n",
        xml_escape(label)
    ));
    plist.push_str("    <key>ProgramArguments</key>\n    <array>\n");
    for arg in program_args {
        plist.push_str(&format!("        <string>{}</string>\n", xml_escape(arg)));
    }
    plist.push_str("    </array>\n");
    plist.push_str("    <key>RunAtLoad</key>\n    <true/>\n");
    plist.push_str("</dict>\n</plist>\n");
    plist
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn current_exe() -> Result<String, AutostartError> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.to_str().map(str::to_owned))
        .ok_or(AutostartError::ExePath)
}

#[cfg(not(target_os = "windows"))]
fn write_entry(path: &std::path::Path, contents: &str) -> Result<(), AutostartError> {
    let write_err = |source| AutostartError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }
    std::fs::write(path, contents).map_err(write_err)
}

/// Registers the current executable to start at login, overwriting any
/// previous registration.
#[cfg(target_os = "macos")]
pub fn enable() -> Result<(), AutostartError> {
    const LABEL: &str = "com.neckprotector.app";

    let exe = current_exe()?;
    let plist_path = dirs::home_dir()
        .ok_or(AutostartError::NoDir("LaunchAgents"))?
        .join("Library/LaunchAgents")
        .join(format!("{LABEL}.plist"));

    // Launch through the bundle when there is one so macOS treats it as an app
    let bundle = std::path::Path::new(&exe)
        .parent()
        .filter(|p| p.ends_with("Contents/MacOS"))
        .and_then(|p| p.parent())
        .and_then(|p| p.parent());
    let program_args = match bundle {
        Some(app) => vec![
            "/usr/bin/open".to_owned(),
            "-a".to_owned(),
            app.display().to_string(),
            "--args".to_owned(),
            BACKGROUND_FLAG.to_owned(),
        ],
        None => vec![exe, BACKGROUND_FLAG.to_owned()],
    };

    write_entry(&plist_path, &launch_agent_plist(LABEL, &program_args))?;
    tracing::info!(path = %plist_path.display(), "Autostart registered via LaunchAgent");
    Ok(())
}

/// Registers the current executable to start at login, overwriting any
/// previous registration.
#[cfg(target_os = "windows")]
pub fn enable() -> Result<(), AutostartError> {
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";
    const VALUE_NAME: &str = "NeckProtector";

    let command = run_command_line(&current_exe()?);
    // create_subkey opens the key when it already exists
    let (run_key, _) = RegKey::predef(HKEY_CURRENT_USER)
        .create_subkey(RUN_KEY)
        .map_err(AutostartError::Registry)?;
    run_key
        .set_value(VALUE_NAME, &command)
        .map_err(AutostartError::Registry)?;

    tracing::info!(command = %command, "Autostart registered via Run key");
    Ok(())
}

/// Registers the current executable to start at login, overwriting any
/// previous registration.
#[cfg(target_os = "linux")]
pub fn enable() -> Result<(), AutostartError> {
    let desktop_path = dirs::config_dir()
        .ok_or(AutostartError::NoDir("autostart"))?
        .join("autostart")
        .join("neck-protector.desktop");

    write_entry(&desktop_path, &desktop_entry(&current_exe()?))?;
    tracing::info!(path = %desktop_path.display(), "Autostart registered via XDG autostart");
    Ok(())
}
