use clap::Parser;
use roomatcher::{cli, config, convert, error, export, input, pipeline, split};
use cli::{Cli, Commands};
use config::{Config, Overrides};
use error::Result;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Match {
            input: input_path,
            output,
            format,
            threshold,
            rules,
            rules_file,
            special,
            no_default_special,
            limit,
            sequential,
        } => {
            println!("🏨 roomatcher - 房型照合\n");

            // 1. 設定の検証（行を読む前に失敗させる）
            let overrides = Overrides {
                threshold,
                rules_file,
                rules,
                special,
                no_default_special,
                limit,
            };
            let match_config = Config::load()?.build_match_config(&overrides)?;
            println!(
                "- 閾値: {} / 書き換えルール: {}件 / 特殊ルール: {}件",
                match_config.threshold,
                match_config.rewrite_rules.len(),
                match_config.special_rules.len()
            );

            // 2. 読み込み
            println!("[1/3] カタログを読み込み中...");
            let rows = input::read_catalog(&input_path)?;
            println!("✔ {}行を読み込み\n", rows.len());

            // 3. 照合
            println!("[2/3] 照合中...");
            let options = pipeline::RunOptions {
                sequential,
                show_progress: !cli.verbose,
            };
            let (records, summary) = pipeline::run(&rows, &match_config, options);
            println!(
                "✔ 照合完了: 一致 {} / 要確認 {}（閾値未満 {}, 特殊ルール棄却 {}, 候補なし {}）\n",
                summary.matched,
                summary.unmatched(),
                summary.below_threshold,
                summary.rejected,
                summary.no_candidates
            );

            // 4. 出力
            println!("[3/3] 結果を保存中...");
            let saved = export::export_records(
                &records,
                &format,
                &input_path,
                output.as_deref(),
                match_config.threshold,
            )?;
            println!("✔ 結果を保存: {}", saved.display());

            println!("\n✅ 照合完了");
        }

        Commands::Convert { input, output, separator } => {
            println!("📄 roomatcher - CSV変換\n");

            let delimiter = convert::parse_separator(&separator)?;
            let output = output.unwrap_or_else(|| convert::default_output_path(&input));
            let summary = convert::convert_csv_to_excel(&input, &output, delimiter)?;
            println!("✔ {}行 x {}列を変換: {}", summary.rows, summary.columns, output.display());
        }

        Commands::Split { text, file, dedup } => {
            let content = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => input::read_file_as_utf8(&path)?,
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let result = split::split_items(&content, dedup);
            println!("{}", result.joined());
            eprintln!("件数: {}", result.count());
        }

        Commands::Config {
            show,
            set_threshold,
            add_rule,
            remove_rule,
            add_special,
            remove_special,
            reset,
        } => {
            let mut config = if reset { Config::default() } else { Config::load()? };
            let changed = reset
                || set_threshold.is_some()
                || !add_rule.is_empty()
                || remove_rule.is_some()
                || !add_special.is_empty()
                || !remove_special.is_empty();

            if let Some(value) = set_threshold {
                config.threshold = roomatcher_common::Threshold::new(value)?;
            }
            if let Some(index) = remove_rule {
                let removed = config.remove_rule(index)?;
                println!("✔ ルールを削除: {}", removed);
            }
            for rule in &add_rule {
                config.add_rule(rule)?;
                println!("✔ ルールを追加: {}", rule);
            }
            for keyword in &remove_special {
                if !config.special_rules.remove(keyword) {
                    println!("⚠ 特殊ルールに存在しません: {}", keyword);
                }
            }
            for keyword in &add_special {
                config.special_rules.insert(keyword);
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  閾値: {}", config.threshold);
                println!("  候補数: {}", config.candidate_limit);
                println!("  書き換えルール:");
                if config.rewrite_rules.is_empty() {
                    println!("    (なし)");
                }
                for (i, rule) in config.rewrite_rules.iter().enumerate() {
                    println!("    {}) {}", i, rule);
                }
                let keywords: Vec<&str> = config.special_rules.iter().collect();
                println!("  特殊ルール: {}", keywords.join(", "));
            }
        }
    }

    Ok(())
}
