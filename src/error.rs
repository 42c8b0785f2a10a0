use std::io::Error as IOError;
use std::path::PathBuf;

use quick_error::quick_error;
use regex::Error as RegexError;
use semver::Error as SemVerError;
use toml::de::Error as TomlError;

quick_error! {
    #[derive(Debug)]
    pub enum FatalError {
        IOError(err: IOError) {
            from()
            source(err)
            display("IO Error: {}", err)
        }
        FileNotFound(filename: PathBuf) {
            display("Unable to find file {} to track version", filename.display())
        }
        VersionNotFound(pattern: String) {
            display("No version field matching `{}` found", pattern)
        }
        InvalidConfigFileFormat(err: TomlError) {
            display("Invalid TOML file format: {}", err)
            from()
            source(err)
        }
        PatternError(err: RegexError) {
            from()
            source(err)
            display("RegexError {}", err)
        }
        SemVerError(err: SemVerError) {
            from()
            source(err)
            display("SemVerError {}", err)
        }
        InvalidReleaseLevel(level: String) {
            display("Unsupported release level {}, only major, minor and patch are supported", level)
        }
        NoTrackedFiles {
            display("No files are being tracked")
        }
    }
}
