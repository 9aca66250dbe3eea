/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     interpreter/call_stack.rs
 * Purpose:  Activation records and the call stack, with static-chain lookup
 * 
 * Author:   Sam Wilcox
 * 
 * License:
 * This file is part of the SPI project.
 * 
 * SPI is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use std::collections::BTreeMap;
use std::fmt;

use crate::interpreter::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ARKind {
    Program,
    Procedure,
}

impl fmt::Display for ARKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ARKind::Program => "PROGRAM",
            ARKind::Procedure => "PROCEDURE",
        })
    }
}

/// Storage for one live invocation of the program or a procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationRecord {
    pub name: String,
    pub kind: ARKind,

    /// Scope level of the code running in this frame: 1 for the program.
    pub nesting_level: usize,

    /// Stack index of the frame for the lexically enclosing scope.
    ///
    /// `None` only for the program frame.
    pub access_link: Option<usize>,

    members: BTreeMap<String, Value>,
}

impl ActivationRecord {
    pub fn new(
        name: impl Into<String>,
        kind: ARKind,
        nesting_level: usize,
        access_link: Option<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            nesting_level,
            access_link,
            members: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.members.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }
}

impl fmt::Display for ActivationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.nesting_level, self.kind, self.name)?;
        for (name, value) in &self.members {
            write!(f, "\n    {:<20}: {}", name, value)?;
        }
        Ok(())
    }
}

/// The dynamic chain of live activation records. Strictly LIFO.
#[derive(Debug, Default)]
pub struct CallStack {
    records: Vec<ActivationRecord>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ActivationRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<ActivationRecord> {
        self.records.pop()
    }

    pub fn peek(&self) -> Option<&ActivationRecord> {
        self.records.last()
    }

    /// Frame by stack index, 0 being the program frame.
    pub fn get(&self, index: usize) -> Option<&ActivationRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ActivationRecord> {
        self.records.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the frame for scope `level` by following access links down
    /// from the top frame.
    ///
    /// # Returns
    /// The stack index of that frame, or `None` when the static chain has
    /// no frame at that level.
    pub fn find_level(&self, level: usize) -> Option<usize> {
        let mut index = self.records.len().checked_sub(1);

        while let Some(i) = index {
            let record = &self.records[i];
            if record.nesting_level == level {
                return Some(i);
            }
            if record.nesting_level < level {
                return None;
            }
            index = record.access_link;
        }

        None
    }
}

/// Top frame first.
impl fmt::Display for CallStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CALL STACK")?;
        for record in self.records.iter().rev() {
            write!(f, "\n{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_renders_members() {
        let mut record = ActivationRecord::new("P", ARKind::Program, 1, None);
        record.set("X", Value::Integer(14));

        let text = record.to_string();
        assert!(text.starts_with("1: PROGRAM P"));
        assert!(text.contains("\n    X"));
        assert!(text.ends_with(": 14"));
    }

    #[test]
    fn push_and_pop_are_lifo() {
        let mut stack = CallStack::new();
        stack.push(ActivationRecord::new("P", ARKind::Program, 1, None));
        stack.push(ActivationRecord::new("Q", ARKind::Procedure, 2, Some(0)));

        assert_eq!(stack.peek().map(|r| r.name.as_str()), Some("Q"));
        assert_eq!(stack.pop().map(|r| r.name), Some("Q".to_string()));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn find_level_follows_access_links_not_the_dynamic_chain() {
        // P calls A (level 2), A calls B (declared in P, so also level 2).
        // From B, level 2 must be B itself and level 1 must be P.
        let mut stack = CallStack::new();
        stack.push(ActivationRecord::new("P", ARKind::Program, 1, None));
        stack.push(ActivationRecord::new("A", ARKind::Procedure, 2, Some(0)));
        stack.push(ActivationRecord::new("B", ARKind::Procedure, 2, Some(0)));

        assert_eq!(stack.find_level(2), Some(2));
        assert_eq!(stack.find_level(1), Some(0));
        assert_eq!(stack.find_level(3), None);
    }

    #[test]
    fn dump_lists_the_top_frame_first() {
        let mut stack = CallStack::new();
        stack.push(ActivationRecord::new("P", ARKind::Program, 1, None));
        stack.push(ActivationRecord::new("Q", ARKind::Procedure, 2, Some(0)));

        assert_eq!(stack.to_string(), "CALL STACK\n2: PROCEDURE Q\n1: PROGRAM P");
    }
}
