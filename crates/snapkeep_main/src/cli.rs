use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use snapkeep_domain::{CountType, Error, RetentionPolicy, parse_key_values};
use snapkeep_services::{ConsoleRequest, SnapshotAction, SnapshotQuery};

#[derive(Parser)]
#[command(name = "snapkeep", version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage EBS snapshots under a retention policy")]
pub struct Cli {
    /// Path to the credentials config file.
    ///
    /// Defaults to `.snapkeep.toml` in the home directory.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Profile section of the config file to use.
    #[arg(long, short = 'p', default_value = "default")]
    pub profile: String,

    /// AWS region; overrides the region from the config file.
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', default_value_t = false)]
    pub yes: bool,

    /// Forward the provider's dry-run flag on mutating calls.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolved config file path; falls back to `~/.snapkeep.toml`.
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => path.clone(),
            None => std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".snapkeep.toml"),
        }
    }

    pub fn action(&self) -> SnapshotAction {
        match &self.command {
            Command::List(_) => SnapshotAction::List,
            Command::Create(_) => SnapshotAction::Create,
            Command::Delete(_) => SnapshotAction::Delete,
        }
    }

    /// Translates the parsed arguments into a console request. Malformed
    /// `KEY=VALUE` filters or tags fail here, before any provider call.
    pub fn to_request(&self) -> Result<ConsoleRequest, Error> {
        let request = match &self.command {
            Command::List(args) | Command::Delete(args) => ConsoleRequest::default()
                .query(SnapshotQuery {
                    snapshot_ids: args.snapshot_ids.clone(),
                    filters: parse_key_values(&args.filters)?,
                    owner: args.owner.clone(),
                })
                .policy(
                    RetentionPolicy::default()
                        .count(args.count)
                        .count_type(args.count_type)
                        .limit(args.limit),
                ),
            Command::Create(args) => ConsoleRequest::default()
                .volume_id(args.volume_id.clone())
                .description(args.description.clone())
                .tags(parse_key_values(&args.tags)?),
        };

        Ok(request.auto_confirm(self.yes).dry_run(self.dry_run))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List snapshots retained by the policy.
    List(SelectionArgs),
    /// Create a snapshot of a volume.
    Create(CreateArgs),
    /// Delete the snapshots the policy expires.
    Delete(SelectionArgs),
}

#[derive(Args)]
pub struct SelectionArgs {
    /// Restrict to these snapshot ids.
    pub snapshot_ids: Vec<String>,

    /// Provider-side filter as NAME=VALUE; may be repeated.
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Snapshots (or days, with --type days) to retain.
    ///
    /// Negative means unbounded; zero retains nothing beyond the snapshots
    /// shielded by --limit.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub count: i64,

    /// Newest snapshots to shield from expiry before the policy applies.
    ///
    /// Negative shields none.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub limit: i64,

    /// How --count is interpreted.
    #[arg(long = "type", value_parser = count_type_parser, default_value = "num")]
    pub count_type: CountType,

    /// Owner id or alias whose snapshots are listed.
    #[arg(long, default_value = "self")]
    pub owner: String,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Volume to snapshot.
    pub volume_id: String,

    /// Description for the new snapshot.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Tag as KEY=VALUE applied to the new snapshot; may be repeated.
    #[arg(long = "tags")]
    pub tags: Vec<String>,
}

/// Parses the `--type` flag into a [`CountType`].
fn count_type_parser(value: &str) -> Result<CountType, String> {
    value
        .parse()
        .map_err(|_| format!("invalid count type '{value}', expected 'num' or 'days'"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(line: &str) -> Cli {
        Cli::try_parse_from(line.split_whitespace()).unwrap()
    }

    #[test]
    fn test_list_parser_defaults() {
        let actual = parse("snapkeep list snap-123456 snap-54321");

        let Command::List(args) = &actual.command else {
            panic!("expected a list command");
        };
        assert_eq!(args.snapshot_ids, vec!["snap-123456", "snap-54321"]);
        assert_eq!(args.filters, Vec::<String>::new());
        assert_eq!(args.count, -1);
        assert_eq!(args.limit, -1);
        assert_eq!(args.count_type, CountType::Num);
        assert_eq!(args.owner, "self");
        assert_eq!(actual.profile, "default");
        assert!(!actual.yes);
        assert!(!actual.dry_run);
    }

    #[test]
    fn test_delete_parser_with_policy_flags() {
        let actual =
            parse("snapkeep -y -r eu-west-1 delete --count=2 --type=days --filter Name=Backup -- snap-111111");

        assert!(actual.yes);
        assert_eq!(actual.region.as_deref(), Some("eu-west-1"));
        let Command::Delete(args) = &actual.command else {
            panic!("expected a delete command");
        };
        assert_eq!(args.snapshot_ids, vec!["snap-111111"]);
        assert_eq!(args.count, 2);
        assert_eq!(args.count_type, CountType::Days);
        assert_eq!(args.filters, vec!["Name=Backup"]);
    }

    #[test]
    fn test_create_parser() {
        let actual = parse(
            "snapkeep -y --region ap-northeast-1 create --description CreateTest \
             --tags Name=Test --tags Type=UnderTest vol-9999999",
        );

        let Command::Create(args) = &actual.command else {
            panic!("expected a create command");
        };
        assert_eq!(args.volume_id, "vol-9999999");
        assert_eq!(args.description, "CreateTest");
        assert_eq!(args.tags, vec!["Name=Test", "Type=UnderTest"]);
    }

    #[test]
    fn test_negative_count_and_limit_are_accepted() {
        let actual = parse("snapkeep list --count -1 --limit -2");

        let Command::List(args) = &actual.command else {
            panic!("expected a list command");
        };
        assert_eq!(args.count, -1);
        assert_eq!(args.limit, -2);
    }

    #[test]
    fn test_invalid_count_type_is_rejected() {
        let actual = Cli::try_parse_from("snapkeep list --type weeks".split_whitespace());
        assert!(actual.is_err());
    }

    #[test]
    fn test_list_request_carries_query_and_policy() {
        let fixture = parse(
            "snapkeep --dry-run -y list --filter volume-id=vol-123456 --count 3 --limit 1",
        );

        let actual = fixture.to_request().unwrap();

        assert_eq!(
            actual.query,
            SnapshotQuery {
                snapshot_ids: Vec::new(),
                filters: HashMap::from([("volume-id".to_string(), "vol-123456".to_string())]),
                owner: "self".to_string(),
            }
        );
        assert_eq!(actual.policy.count, 3);
        assert_eq!(actual.policy.limit, 1);
        assert!(actual.auto_confirm);
        assert!(actual.dry_run);
    }

    #[test]
    fn test_create_request_parses_tags() {
        let fixture = parse("snapkeep create --tags Name=Test vol-9999999");

        let actual = fixture.to_request().unwrap();

        assert_eq!(actual.volume_id.as_deref(), Some("vol-9999999"));
        assert_eq!(
            actual.tags,
            HashMap::from([("Name".to_string(), "Test".to_string())])
        );
        assert!(!actual.dry_run);
    }

    #[test]
    fn test_malformed_filter_is_a_format_error() {
        let fixture = parse("snapkeep list --filter Broken=Testcase=Blah");

        let actual = fixture.to_request().unwrap_err();

        assert_eq!(actual, Error::InvalidKeyValue("Broken=Testcase=Blah".to_string()));
    }
}
