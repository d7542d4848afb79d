use std::{
    error::Error,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
};

use clap::{Arg, ArgAction, Command, value_parser};
use opencc_core::{Converter, utf8};
use opencc_dict::{list_configs, resolve_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let dict_dirs: Vec<PathBuf> = matches
        .get_many::<PathBuf>("dict-dir")
        .map(|dirs| dirs.cloned().collect())
        .unwrap_or_default();
    let mut config_dirs = vec![PathBuf::from("data").join("config")];
    config_dirs.extend(dict_dirs.iter().cloned());

    if matches.get_flag("list") {
        for name in list_configs(&config_dirs)? {
            println!("{name}");
        }
        return Ok(());
    }

    let preset = matches
        .get_one::<String>("config")
        .ok_or("缺少 --config")?;
    let source = resolve_config(preset, &config_dirs)?;
    tracing::debug!(?source, "config resolved");
    let converter = source.load_converter(&dict_dirs)?;

    let input: Box<dyn BufRead> = match matches.get_one::<PathBuf>("input") {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match matches.get_one::<PathBuf>("output") {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    convert_lines(&converter, input, BufWriter::new(output))?;
    Ok(())
}

fn cli() -> Command {
    Command::new("opencc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("简繁及地区用字转换")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("预设名（如 s2t）或配置文件路径")
                .required_unless_present("list"),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .help("输入文件（默认标准输入）")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("输出文件（默认标准输出）")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dict-dir")
                .long("dict-dir")
                .short('d')
                .help("额外的配置与词典目录，可重复")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("列出可用的预设")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("输出调试日志")
                .action(ArgAction::SetTrue),
        )
}

/// 日志写到 stderr；`RUST_LOG` 优先。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// 逐行转换。按字节读取，非法 UTF-8 原样透传。
fn convert_lines(
    converter: &Converter,
    mut input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    let mut line = Vec::new();
    let (mut lines, mut chars) = (0usize, 0usize);
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        strip_line_ending(&mut line);
        lines += 1;
        if std::str::from_utf8(&line).is_err() {
            tracing::warn!(line = lines, "invalid UTF-8, bytes passed through");
        }
        chars += utf8::char_count(&line);
        output.write_all(&converter.convert_bytes(&line))?;
        output.write_all(b"\n")?;
    }
    output.flush()?;
    tracing::info!(converter = converter.name(), lines, chars, "conversion finished");
    Ok(())
}

/// 去掉结尾的 `\n` 及其前面至多一个 `\r`。
fn strip_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencc_core::{
        Conversion, ConversionChain, Dictionary, Entry, MaxMatchSegmenter, TextDictionary,
    };
    use std::sync::Arc;

    fn converter() -> Converter {
        let dict: Arc<dyn Dictionary> = Arc::new(TextDictionary::from_entries(vec![
            Entry::with_value("汉字", "漢字"),
            Entry::with_values("发", vec!["髪".into(), "發".into()]),
        ]));
        let chain = ConversionChain::new(vec![Conversion::new(Arc::clone(&dict))]);
        Converter::new("test", Box::new(MaxMatchSegmenter::new(dict)), chain)
    }

    #[test]
    fn converts_each_line() {
        let mut out = Vec::new();
        convert_lines(&converter(), "汉字\r\n头发\n\nabc".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "漢字\n头髪\n\nabc\n");
    }

    #[test]
    fn only_one_carriage_return_is_stripped() {
        let mut out = Vec::new();
        convert_lines(&converter(), &b"x\r\r\n\r\nlast\r"[..], &mut out).unwrap();
        assert_eq!(out, b"x\r\n\nlast\r\n");

        let mut line = b"a\r\n".to_vec();
        strip_line_ending(&mut line);
        assert_eq!(line, b"a");
        let mut line = b"a\r".to_vec();
        strip_line_ending(&mut line);
        assert_eq!(line, b"a\r");
    }

    #[test]
    fn invalid_bytes_are_kept() {
        let mut out = Vec::new();
        convert_lines(&converter(), &b"\xfe\xe5\x8f\x91\n"[..], &mut out).unwrap();
        let mut expected = vec![0xFEu8];
        expected.extend_from_slice("髪\n".as_bytes());
        assert_eq!(out, expected);
    }

    #[test]
    fn list_does_not_need_config() {
        let matches = cli().try_get_matches_from(["opencc", "--list"]).unwrap();
        assert!(matches.get_flag("list"));
        assert!(cli().try_get_matches_from(["opencc"]).is_err());

        let matches = cli()
            .try_get_matches_from(["opencc", "-c", "s2t", "-d", "a", "-d", "b"])
            .unwrap();
        let dirs: Vec<&PathBuf> = matches.get_many::<PathBuf>("dict-dir").unwrap().collect();
        assert_eq!(dirs, [&PathBuf::from("a"), &PathBuf::from("b")]);
    }
}
