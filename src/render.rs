use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::tasks::Task;

const TEMPLATE_NAME: &str = "todo";
const TODO_TEMPLATE: &str =
    "{% for task in tasks %}{{ task.description }} -- {{ task.link }}\n{% endfor %}";

#[derive(Serialize)]
struct TodoLine<'a> {
    description: &'a str,
    link: &'a str,
}

#[derive(Serialize)]
struct TodoContext<'a> {
    tasks: Vec<TodoLine<'a>>,
}

/// Unresolved tasks, in their original order.
pub fn unresolved(tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(|t| t.is_unresolved())
}

/// Renders tasks as todo.txt lines. Build once and reuse.
pub struct TodoRenderer {
    engine: upon::Engine<'static>,
}

impl TodoRenderer {
    pub fn new() -> Result<Self> {
        let mut engine = upon::Engine::new();
        engine
            .add_template(TEMPLATE_NAME, TODO_TEMPLATE)
            .map_err(|e| Error::Template(e.to_string()))?;
        Ok(Self { engine })
    }

    /// One `<content> -- <comment link>` line per unresolved task.
    pub fn render(&self, tasks: &[Task]) -> Result<String> {
        let ctx = TodoContext {
            tasks: unresolved(tasks)
                .map(|t| TodoLine {
                    description: &t.content.raw,
                    link: &t.comment.links.html.href,
                })
                .collect(),
        };
        self.engine
            .template(TEMPLATE_NAME)
            .render(&ctx)
            .to_string()
            .map_err(|e| Error::Template(e.to_string()))
    }

    pub fn write_to(&self, tasks: &[Task], out: &mut dyn Write) -> Result<()> {
        let text = self.render(tasks)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
