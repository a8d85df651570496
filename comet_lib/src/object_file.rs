use std::error;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::registers::STACK_TOP;

/// The tag an assembled object file starts with.
pub const OBJECT_MAGIC: [u8; 4] = *b"CASL";
/// Header size in bytes; bytes 4..15 are reserved and ignored on load.
pub const HEADER_LEN: usize = 16;

#[derive(Debug)]
pub enum ObjectFileError {
    // ↓ the file does not start with the CASL tag (or is shorter than the header)
    BadMagic(String),
    // ↓ the payload would overflow into the stack region
    OutOfMemory,
    Io(io::Error),
}

impl fmt::Display for ObjectFileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectFileError::BadMagic(origin) => {
                write!(f, "'{}' is not a CASL object file.", origin)
            }
            ObjectFileError::OutOfMemory => {
                write!(
                    f,
                    "Object image does not fit below the stack region (#0x{:04X}).",
                    STACK_TOP
                )
            }
            ObjectFileError::Io(e) => {
                write!(f, "Could not read object file: {}", e)
            }
        }
    }
}

impl error::Error for ObjectFileError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ObjectFileError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::convert::From<io::Error> for ObjectFileError {
    fn from(err: io::Error) -> ObjectFileError {
        ObjectFileError::Io(err)
    }
}

/*
 * An assembled COMET object image: a 16 byte header tagged CASL followed
 * by big endian 16 bit words destined for memory address 0 upward. Parsing
 * happens on an in-memory buffer so a failed load never leaves a half
 * written machine behind; the debugger swaps in a fresh memory only once
 * the whole image decoded.
 */
#[derive(Debug)]
pub struct ObjectFile {
    words: Vec<u16>,
}

impl ObjectFile {
    pub fn from_bytes(bytes: &[u8], origin: &str) -> Result<Self, ObjectFileError> {
        if bytes.len() < HEADER_LEN || bytes[0..4] != OBJECT_MAGIC {
            return Err(ObjectFileError::BadMagic(origin.to_owned()));
        }

        let payload = &bytes[HEADER_LEN..];
        // the image may fill 0x0000..=0xFEFF, one word per address
        if payload.len() > 2 * STACK_TOP as usize {
            return Err(ObjectFileError::OutOfMemory);
        }

        let words = payload
            .chunks(2)
            .map(|chunk| (chunk[0] as u16) << 8 | *chunk.get(1).unwrap_or(&0) as u16)
            .collect();

        Ok(ObjectFile { words })
    }

    /// Read an object file to EOF and decode it. The handle is not kept.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ObjectFileError> {
        let mut bytes: Vec<u8> = Vec::new();
        File::open(path.as_ref())?.read_to_end(&mut bytes)?;

        Self::from_bytes(&bytes, &path.as_ref().display().to_string())
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }
}
