// src/commands.rs
use std::fs;

use anyhow::{bail, Context};
use cliq_hub_client::{
    ClientContext, GenerateRequest, Navigation, NewTemplate, RouteMatch, TemplateSummary,
    YamlEncoding,
};

use crate::{Command, TemplatesCommand};

pub(crate) async fn run(context: &ClientContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = context.session.try_login(&email, &password).await?;
            println!("Signed in as {} (id {})", user.username, user.id);
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            context
                .session
                .try_register(&username, &email, &password)
                .await?;
            println!("Registered {username}, run `cliq-hub login` to sign in");
        }
        Command::Logout => {
            context.session.logout();
            println!("Signed out");
        }
        Command::Whoami => match (context.session.is_authenticated(), context.session.user()) {
            (true, Some(user)) => println!("{} (id {})", user.username, user.id),
            (true, None) => println!("Signed in, user record unavailable"),
            (false, _) => println!("Not signed in"),
        },
        Command::Templates { command } => templates(context, command).await?,
        Command::Generate {
            command_example,
            name,
            description,
            author,
            output,
        } => {
            let mut request = GenerateRequest::new(command_example);
            request.name = name;
            request.description = description;
            request.author = author;
            request.encoding = Some(YamlEncoding::Base64);

            let generated = context.templates.try_generate_template(&request).await?;
            let yaml = generated.yaml_text()?;
            match output {
                Some(path) => {
                    fs::write(&path, yaml)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{yaml}"),
            }
        }
        Command::Route { location, guarded } => {
            if guarded {
                match context.routes.navigate(&location, &context.session)? {
                    Navigation::Render(matched) => print_match(&matched),
                    Navigation::Redirect { to, from } => println!("redirect {from} -> {to}"),
                }
            } else {
                print_match(&context.routes.resolve(&location)?);
            }
        }
    }

    Ok(())
}

async fn templates(context: &ClientContext, command: TemplatesCommand) -> anyhow::Result<()> {
    match command {
        TemplatesCommand::List => {
            context.templates.try_fetch_templates().await?;
            for template in context.templates.templates() {
                println!("{}", summary_line(&template));
            }
        }
        TemplatesCommand::Show { id } => {
            let detail = context.templates.try_fetch_template(id).await?;
            println!("{}", serde_json::to_string_pretty(detail.raw())?);
        }
        TemplatesCommand::Upload {
            file,
            title,
            description,
        } => {
            if !context.session.is_authenticated() {
                bail!("not signed in, run `cliq-hub login` first");
            }
            let content = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let draft = NewTemplate {
                title,
                description,
                content,
            };
            let created = context.templates.try_create_template(&draft).await?;
            match created.get("ID").or_else(|| created.get("id")) {
                Some(id) => println!("Uploaded template {id}"),
                None => println!("Uploaded template"),
            }
        }
    }

    Ok(())
}

fn summary_line(template: &TemplateSummary) -> String {
    let id = template
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    match (template.title(), template.description()) {
        (Some(title), Some(description)) if !description.is_empty() => {
            format!("{id}\t{title}\t{description}")
        }
        (Some(title), _) => format!("{id}\t{title}"),
        _ => format!("{id}\t{}", template.raw()),
    }
}

fn print_match(matched: &RouteMatch<'_>) {
    println!("{} -> {} ({})", matched.name, matched.view, matched.module.title);
    for (key, value) in &matched.params {
        println!("  param {key}={value}");
    }
    for (key, value) in &matched.query {
        println!("  query {key}={value}");
    }
}
