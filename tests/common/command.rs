use assert_cmd::Command;
use std::path::Path;

pub fn run_mrdiff_command(git_dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("mrdiff").expect("Failed to find mrdiff binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("MRDIFF_BATCH_LOAD");
    cmd.env_remove("MRDIFF_PER_PAGE");
    cmd.arg("--git-dir").arg(git_dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> Result<String, Box<dyn std::error::Error>> {
    let output = cmd.assert().success();
    Ok(String::from_utf8(output.get_output().stdout.clone())?)
}
