//! The second execution strategy: a single-pass compiler from the same AST
//! used by [`crate::interpreter`] into a flat [`chunk::Chunk`], and a stack
//! machine ([`vm::VM`]) that runs it. The two backends deliberately do not
//! share a value representation: [`value::Value`] is the VM's own tagged
//! union, distinct from [`crate::object::Object`].
//!
//! Only a subset of the language compiles today. `while`, `for`, functions,
//! calls, `return`, classes, `this`, `super`, and property access all
//! surface as a [`crate::error::CompileError`] rather than silently
//! producing wrong bytecode; see [`compiler::Compiler`] for the exact list.

pub mod chunk;
pub mod compiler;
pub mod hashmap;
pub mod value;
pub mod vm;

pub use chunk::Chunk;
pub use compiler::Compiler;
pub use value::Value;
pub use vm::VM;
