mod instruction_footer;
pub mod list;

pub use instruction_footer::InstructionFooter;
pub use list::Gallery;
