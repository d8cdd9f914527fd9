// Tests for the autostart entry builders in src/autostart.rs

use neck_protector::autostart::{desktop_entry, launch_agent_plist, run_command_line};

#[test]
fn test_run_command_line_quotes_path() {
    assert_eq!(
        run_command_line(r"C:\Program Files\Neck Protector\neck-protector.exe"),
        r#""C:\Program Files\Neck Protector\neck-protector.exe" --background"#
    );
}

#[test]
fn test_desktop_entry_launches_in_background() {
    let entry = desktop_entry("/usr/bin/neck-protector");

    assert!(entry.starts_with("[Desktop Entry]\n"));
    assert!(entry.contains("\nExec=\"/usr/bin/neck-protector\" --background\n"));
    assert!(entry.contains("\nName=Neck Protector\n"));
    assert!(entry.contains("\nType=Application\n"));
}

#[test]
fn test_launch_agent_plist_lists_arguments() {
    let args = vec![
        "/Applications/Neck Protector.app/Contents/MacOS/neck-protector".to_string(),
        "--background".to_string(),
    ];
    let plist = launch_agent_plist("com.neckprotector.app", &args);

    assert!(plist.contains("<string>com.neckprotector.app</string>"));
    assert!(plist.contains(
        "<string>/Applications/Neck Protector.app/Contents/MacOS/neck-protector</string>"
    ));
    assert!(plist.contains("<string>--background</string>"));
    assert!(plist.contains("<key>RunAtLoad</key>\n    <true/>"));
}

#[test]
fn test_launch_agent_plist_escapes_xml() {
    let plist = launch_agent_plist("label", &["/tmp/a&b<c>".to_string()]);

    assert!(plist.contains("<string>/tmp/a&amp;b&lt;c&gt;</string>"));
}
