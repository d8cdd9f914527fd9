fn main() {
    // Propagate NECK_PROTECTOR_VERSION so release builds can stamp the tag version
    if let Ok(version) = std::env::var("NECK_PROTECTOR_VERSION") {
        println!("cargo:rustc-env=NECK_PROTECTOR_VERSION={}", version);
    }

    #[cfg(target_os = "windows")]
    {
        let mut res = winresource::WindowsResource::new();
        res.set_icon("assets/neck_protector.ico");
        res.set("ProductName", "Neck Protector");
        res.set("FileDescription", "Neck stretch reminders");
        res.set("LegalCopyright", "Copyright (c) neck-protector contributors");

        let version = std::env::var("NECK_PROTECTOR_VERSION")
            .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

        let version_parts: Vec<&str> = version.split('.').collect();
        let component = |index: usize| {
            version_parts
                .get(index)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(0) as u64
        };

        // VERSIONINFO packs major.minor.patch.build into four 16-bit fields
        let version_u64 = component(0) << 48 | component(1) << 32 | component(2) << 16;
        res.set_version_info(winresource::VersionInfo::PRODUCTVERSION, version_u64);
        res.set_version_info(winresource::VersionInfo::FILEVERSION, version_u64);
        res.set("ProductVersion", &version);
        res.set("FileVersion", &version);

        res.set_manifest(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<assembly xmlns="urn:schemas-microsoft-com:asm.v1" manifestVersion="1.0">
  <assemblyIdentity
    version="1.0.0.0"
    processorArchitecture="*"
    name="com.neckprotector.app"
    type="win32"
  />
  <description>Neck stretch reminders</description>
  <trustInfo xmlns="urn:schemas-microsoft-com:asm.v3">
    <security>
      <requestedPrivileges>
        <requestedExecutionLevel level="asInvoker" uiAccess="false"/>
      </requestedPrivileges>
    </security>
  </trustInfo>
  <compatibility xmlns="urn:schemas-microsoft-com:compatibility.v1">
    <application>
      <!-- Windows 10 and Windows 11 -->
      <supportedOS Id="{8e0f7a12-bfb3-4fe8-b9a5-48fd50a15a9a}"/>
    </application>
  </compatibility>
  <application xmlns="urn:schemas-microsoft-com:asm.v3">
    <windowsSettings>
      <dpiAware xmlns="http://schemas.microsoft.com/SMI/2005/WindowsSettings">true</dpiAware>
      <dpiAwareness xmlns="http://schemas.microsoft.com/SMI/2016/WindowsSettings">permonitorv2,permonitor</dpiAwareness>
    </windowsSettings>
  </application>
</assembly>"#,
        );

        res.compile().expect(
            "Failed to compile Windows resources. Ensure assets/neck_protector.ico exists",
        );
    }
}
