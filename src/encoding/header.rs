use super::*;

/// The fixed record at the start of a stream: a `u16` version then a reserved gap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    version: u16,
}

impl Default for Header {
    fn default() -> Self { Header::new(HEADER_VERSION) }
}

impl Header {
    pub fn new(version: u16) -> Self { Header { version } }

    pub fn version(&self) -> u16 { self.version }

    /// Writes the version and the zeroed gap.
    pub fn write<W: Writer + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_u16(self.version)?;
        w.write_gap(HEADER_GAP)
    }

    /// Reads a header, skipping the gap without inspecting it.
    pub fn read<R: Reader + ?Sized>(r: &mut R) -> Result<Header> {
        let version = r.read_u16()?;
        r.skip(HEADER_GAP)?;
        Ok(Header { version })
    }
}
