//! Shared helpers for recipe integration tests.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use flate2::Compression;
use flate2::write::GzEncoder;
use sha2::{Digest, Sha256};

use liquidpkg_lib::execute::{CommandRunner, ExecuteError, Invocation};
use liquidpkg_lib::sources::SourceTable;

/// Stands in for autotools and make: records every invocation and, when make
/// runs, drops the requested target (plus `config.h`) into the cwd.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  invocations: Mutex<Vec<Invocation>>,
  fail_program: Option<String>,
}

impl RecordingRunner {
  pub fn failing_on(program: &str) -> Self {
    Self {
      fail_program: Some(program.to_string()),
      ..Self::default()
    }
  }

  pub fn invocations(&self) -> Vec<Invocation> {
    self.invocations.lock().unwrap().clone()
  }

  pub fn programs(&self) -> Vec<String> {
    self.invocations().into_iter().map(|inv| inv.program).collect()
  }

  /// The make target that was requested, if make ran.
  pub fn make_target(&self) -> Option<String> {
    self
      .invocations()
      .into_iter()
      .find(|inv| inv.program == "make")
      .and_then(|inv| inv.args.first().cloned())
  }
}

impl CommandRunner for RecordingRunner {
  async fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError> {
    self.invocations.lock().unwrap().push(invocation.clone());

    if self.fail_program.as_deref() == Some(invocation.program.as_str()) {
      return Err(ExecuteError::CmdFailed {
        cmd: invocation.command_line(),
        code: Some(1),
        output: String::new(),
      });
    }

    let cwd = invocation.cwd.clone().expect("build commands run in the source dir");
    match invocation.program.as_str() {
      "autoheader" => std::fs::write(cwd.join("config.h.in"), "").unwrap(),
      "./configure" => std::fs::write(cwd.join("config.h"), "#define HAVE_CONFIG 1").unwrap(),
      "make" => {
        let target = &invocation.args[0];
        // the Darwin archive target still produces a .a
        let produced = if target == "libliquid.ar" { "libliquid.a" } else { target.as_str() };
        std::fs::write(cwd.join(produced), "").unwrap();
        if target == "libliquid.so" {
          std::fs::write(cwd.join("libliquid.so.1"), "").unwrap();
        }
      }
      _ => {}
    }
    Ok(())
  }
}

/// Writes a liquid-dsp-like release archive with a single top-level directory.
pub fn write_release_archive(dir: &Path) -> PathBuf {
  let path = dir.join("v1.3.2.tar.gz");
  let encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
  let mut builder = tar::Builder::new(encoder);
  for (name, contents) in [
    ("liquid-dsp-1.3.2/LICENSE", "Copyright (c) 2007 - 2016 Joseph Gaeddert"),
    ("liquid-dsp-1.3.2/configure.ac", "AC_INIT([liquid-dsp],[1.3.2])"),
    ("liquid-dsp-1.3.2/include/liquid.h", "#ifndef __LIQUID_H__"),
    ("liquid-dsp-1.3.2/src/agc/src/agc.c", "/* agc */"),
  ] {
    let mut header = tar::Header::new_gnu();
    header.set_size(contents.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append_data(&mut header, name, contents.as_bytes()).unwrap();
  }
  builder.into_inner().unwrap().finish().unwrap();
  path
}

/// A source table pointing at a local archive.
pub fn local_table(archive: &Path) -> SourceTable {
  let sha = hex::encode(Sha256::digest(std::fs::read(archive).unwrap()));
  SourceTable::parse(&format!(
    "sources:\n  \"1.3.2\":\n    url: \"file://{}\"\n    sha256: \"{}\"\n",
    archive.display().to_string().replace('\\', "/"),
    sha
  ))
  .unwrap()
}

pub fn lib_files(package_dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(package_dir.join("lib"))
    .map(|entries| {
      entries
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
    })
    .unwrap_or_default();
  names.sort();
  names
}
