//! Command implementations for vdom-unpack CLI

pub mod unpack;
