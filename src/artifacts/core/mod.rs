//! Shared terminal output utilities

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper
/// adapts it. Output is buffered by the pager and shown once `page_all` runs.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Page only interactive output, and never when `NO_PAGER` is set
pub fn should_page() -> bool {
    std::env::var_os("NO_PAGER").is_none() && io::stdout().is_terminal()
}

/// Hand `print` the pager on terminals and locked stdout otherwise
pub fn write_paged<F>(print: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut dyn Write) -> anyhow::Result<()>,
{
    if !should_page() {
        let mut stdout = io::stdout().lock();
        print(&mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let pager = Pager::new();
    let mut writer = PagerWriter::new(pager.clone());
    print(&mut writer)?;
    minus::page_all(pager)?;

    Ok(())
}
