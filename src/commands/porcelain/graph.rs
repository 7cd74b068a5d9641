use crate::areas::repository::Repository;
use crate::artifacts::graph::commit_graph::CommitGraph;

impl Repository {
    /// Print the commit DAG as Graphviz DOT text, parent edges and reference labels included
    pub async fn graph(&mut self) -> anyhow::Result<()> {
        let graph = CommitGraph::load(self.database())?;
        let reverse_refs = self.refs().reverse_refs()?;

        let mut writer = self.writer();
        writeln!(writer, "digraph wit {{")?;
        writeln!(writer, "    rankdir=RL;")?;

        for commit_id in graph.commit_ids() {
            writeln!(writer, "    \"{}\";", commit_id.to_short_id())?;
        }

        for (child, parent) in graph.edges() {
            writeln!(
                writer,
                "    \"{}\" -> \"{}\";",
                child.to_short_id(),
                parent.to_short_id()
            )?;
        }

        for (commit_id, names) in &reverse_refs {
            for name in names {
                let name = escape_dot(name);
                writeln!(writer, "    \"{}\" [shape=box];", name)?;
                writeln!(writer, "    \"{}\" -> \"{}\";", name, commit_id.to_short_id())?;
            }
        }

        writeln!(writer, "}}")?;

        Ok(())
    }
}

/// Escape a name for use inside a double-quoted DOT id
fn escape_dot(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(escape_dot("plain"), "plain");
        assert_eq!(escape_dot(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_dot(r"a\b"), r"a\\b");
    }
}
