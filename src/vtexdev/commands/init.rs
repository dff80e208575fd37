//! Scaffolds the Docker files for a VTEX IO app and builds the dev image.
//!
//! `basic` writes a Dockerfile and `.dockerignore`; `advanced` also writes a
//! `docker-compose.yml` that wires the dev container to the project network.

use crate::commands::{ensure_network, PlanContext};
use crate::plan::{Invocation, Plan, PlanBuilder, Step};
use crate::request::{is_valid_name, ResolvedOptions};

const DOCKERFILE: &str = r#"FROM node:18-alpine

RUN apk add --no-cache git curl \
    && yarn global add vtex

WORKDIR /app
ARG PROJECT_NAME
LABEL io.vtex.project="${PROJECT_NAME}"

COPY . .
EXPOSE 3000
HEALTHCHECK --interval=10s --timeout=3s CMD vtex whoami > /dev/null || exit 1
CMD ["vtex", "link"]
"#;

const DOCKERIGNORE: &str = "node_modules\n.git\n.vtex-dev\n*.log\n";

fn compose_file(name: &str, ctx: &PlanContext) -> String {
    format!(
        r#"services:
  {name}:
    build:
      context: .
      args:
        PROJECT_NAME: {name}
    image: {image}
    container_name: {container}
    ports:
      - "3000:3000"
    volumes:
      - .:/app
      - /app/node_modules
    networks:
      - {network}

networks:
  {network}:
    external: true
"#,
        name = name,
        image = ctx.config.image_tag("latest"),
        container = ctx.config.container_name,
        network = ctx.config.network,
    )
}

const FALLBACK_NAME: &str = "vtex-app";

/// Project name: `--name` (already validated), else the project directory's
/// name folded to the same character set.
fn project_name(options: &ResolvedOptions, ctx: &PlanContext) -> String {
    if let Some(name) = options.text("name") {
        return name.to_string();
    }
    ctx.project_dir()
        .file_name()
        .map(|n| slugify(&n.to_string_lossy()))
        .filter(|name| is_valid_name(name))
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

fn slugify(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .map(|c| match c.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9' | '_') => c,
            _ => '-',
        })
        .collect();
    folded
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let template = options.text("template").unwrap_or("basic");
    let name = project_name(options, ctx);
    let dir = ctx.project_dir();

    let mut steps = PlanBuilder::new();
    steps
        .push(Step::WriteFile {
            path: dir.join("Dockerfile"),
            contents: DOCKERFILE.to_string(),
        })
        .push(Step::WriteFile {
            path: dir.join(".dockerignore"),
            contents: DOCKERIGNORE.to_string(),
        });

    if template == "advanced" {
        steps.push(Step::WriteFile {
            path: dir.join("docker-compose.yml"),
            contents: compose_file(&name, ctx),
        });
    }

    let image = ctx.config.image_tag("latest");
    let build_arg = format!("PROJECT_NAME={}", name);
    steps.run(ensure_network(ctx)).run(Invocation::new(
        &ctx.config.runtime,
        [
            "build",
            "-t",
            image.as_str(),
            "--build-arg",
            build_arg.as_str(),
            ctx.project_dir_arg().as_str(),
        ],
    ));

    steps.finish(options.command())
}
