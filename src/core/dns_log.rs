//! 從 DNS 查詢日誌 (每行最後一欄為查詢名稱) 整理出不重複的網域清單，
//! 產出的檔案可以直接給 `crits-import -d <file> -l` 使用。

use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

pub fn extract_queries<R: BufRead>(reader: R) -> Result<BTreeSet<String>> {
    let mut queries = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(name) = line.split_whitespace().last() {
            queries.insert(name.to_string());
        }
    }
    Ok(queries)
}

pub fn write_queries<W: Write>(mut writer: W, queries: &BTreeSet<String>) -> Result<()> {
    for name in queries {
        writeln!(writer, "{}", name)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_last_field_and_dedup() {
        let log = "\
1700000000.1 10.0.0.5 A evil.net
1700000001.2 10.0.0.6 AAAA example.com

1700000002.3 10.0.0.5 A evil.net
";
        let queries = extract_queries(log.as_bytes()).unwrap();
        assert_eq!(
            queries.into_iter().collect::<Vec<_>>(),
            vec!["evil.net".to_string(), "example.com".to_string()]
        );
    }

    #[test]
    fn test_write_one_per_line() {
        let queries: BTreeSet<String> = ["b.org", "a.com"].iter().map(|s| s.to_string()).collect();
        let mut output = Vec::new();
        write_queries(&mut output, &queries).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "a.com\nb.org\n");
    }
}
