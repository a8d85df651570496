use std::error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ExecutionError {
    // ↓ the opcode byte fetched at this address is not in the opcode table
    IllegalInstruction(u16),
    // ↓ the program reached the EXIT system call
    Exited,
    // ↓ the input stream failed or closed during the IN system call
    Input(io::Error),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecutionError::IllegalInstruction(address) => {
                write!(f, "illegal instruction at address #0x{:04X}", address)
            }
            ExecutionError::Exited => {
                write!(f, "program exited")
            }
            ExecutionError::Input(e) => {
                write!(f, "input stream error during system call: {}", e)
            }
        }
    }
}

impl error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ExecutionError::Input(e) => Some(e),
            _ => None,
        }
    }
}

impl std::convert::From<io::Error> for ExecutionError {
    fn from(err: io::Error) -> ExecutionError {
        ExecutionError::Input(err)
    }
}
