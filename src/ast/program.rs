use super::Statement;

pub type Block = Vec<Statement>;

/// A `def name() { ... }` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcDecl {
    pub name: String,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub procs: Vec<ProcDecl>,
}

impl Program {
    /// Program made of a single `main` procedure
    pub fn main(body: Block) -> Self {
        Self {
            procs: vec![ProcDecl {
                name: "main".to_string(),
                body,
            }],
        }
    }

    pub fn statement_count(&self) -> usize {
        self.procs.iter().map(|p| p.body.len()).sum()
    }
}
