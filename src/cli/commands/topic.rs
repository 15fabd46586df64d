use crate::cli::types::TopicAction;
use crate::config::Config;
use crate::content::{PostStore, TopicDraft};
use crate::utils::error::{BoxResult, KalemError};

/// Handle the topic subcommands
pub fn handle_topic_command(action: &TopicAction, config: &Config) -> BoxResult<()> {
    let mut store = PostStore::open(config.store_path())?;

    match action {
        TopicAction::List => {
            for topic in store.list_topics() {
                println!("{:>3}  {}  {}", topic.id, topic.color, topic.name);
            }
        }
        TopicAction::New { name, color, description } => {
            let topic = store.create_topic(TopicDraft {
                name: name.clone(),
                description: description.clone(),
                color: color.clone(),
            })?;
            store.save()?;
            println!("{}", topic.id);
        }
        TopicAction::Edit { id, name, color, description } => {
            let current = store
                .get_topic(*id)
                .ok_or_else(|| KalemError::NotFound(format!("topic {}", id)))?;

            let draft = TopicDraft {
                name: name.clone().unwrap_or_else(|| current.name.clone()),
                description: description.clone().unwrap_or_else(|| current.description.clone()),
                color: color.clone().unwrap_or_else(|| current.color.clone()),
            };

            let topic = store.update_topic(*id, draft)?;
            store.save()?;
            println!("{}", topic.name);
        }
        TopicAction::Delete { id } => {
            let topic = store.delete_topic(*id)?;
            store.save()?;
            println!("Deleted {}", topic.name);
        }
    }

    Ok(())
}
