use crate::commands::PlanContext;
use crate::plan::{Invocation, Plan, PlanBuilder};
use crate::request::ResolvedOptions;

pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let env = options.text("env").unwrap_or("production");
    let tag = ctx.config.image_tag(env);
    let env_arg = format!("VTEX_ENV={}", env);

    let mut args = vec!["build"];
    if options.flag("no-cache") {
        args.push("--no-cache");
    }
    let dir = ctx.project_dir_arg();
    args.extend(["--build-arg", env_arg.as_str(), "-t", tag.as_str(), dir.as_str()]);

    let mut steps = PlanBuilder::new();
    steps.run(Invocation::new(&ctx.config.runtime, args));
    steps.finish(options.command())
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::*;
    use crate::request::{CommandKind, CommandRequest};

    #[test]
    fn production_with_cache_by_default() {
        let plan = plan_for(CommandRequest::new(CommandKind::Build), &context());
        assert_eq!(
            described(&plan),
            vec![
                "docker build --build-arg VTEX_ENV=production -t vtex-dev:production /work/store"
            ]
        );
    }

    #[test]
    fn staging_without_cache() {
        let plan = plan_for(
            CommandRequest::new(CommandKind::Build)
                .with("env", "staging")
                .with("no-cache", true),
            &context(),
        );
        assert_eq!(
            described(&plan),
            vec![
                "docker build --no-cache --build-arg VTEX_ENV=staging -t vtex-dev:staging /work/store"
            ]
        );
    }
}
