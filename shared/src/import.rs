//! 批量导入执照
//!
//! 每行一条：`姓名;车牌[;状态[;领取地点]]`，分隔符为 `;` 或 TAB。

use crate::error::BackendResult;
use crate::repository::Repository;
use crate::{License, LicenseDraft, LicenseStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 从 1 开始
    pub line: usize,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportReport {
    pub accepted: Vec<LicenseDraft>,
    pub rejected: Vec<RejectedLine>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        if self.rejected.is_empty() {
            return format!("{} licenças importadas", self.accepted.len());
        }
        let lines: Vec<String> = self.rejected.iter().map(|r| r.line.to_string()).collect();
        format!(
            "{} licenças importadas, {} linhas ignoradas ({})",
            self.accepted.len(),
            self.rejected.len(),
            lines.join(", ")
        )
    }
}

pub fn parse_license_lines(text: &str) -> ImportReport {
    let mut report = ImportReport::default();
    let mut first = true;
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        // 只有第一行可能是表头
        if std::mem::take(&mut first) && is_header(line) {
            continue;
        }
        match parse_line(line) {
            Some(draft) => report.accepted.push(draft),
            None => report.rejected.push(RejectedLine {
                line: i + 1,
                content: line.to_string(),
            }),
        }
    }
    report
}

fn is_header(line: &str) -> bool {
    let first_field = line
        .split([';', '\t'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    first_field == "nome" || first_field.starts_with("nome ")
}

fn parse_line(line: &str) -> Option<LicenseDraft> {
    let mut fields = line.split([';', '\t']).map(str::trim);
    let full_name = fields.next().filter(|f| !f.is_empty())?;
    let license_plate = fields.next().filter(|f| !f.is_empty())?;
    let status = match fields.next().filter(|f| !f.is_empty()) {
        Some(raw) => parse_status(raw)?,
        None => LicenseStatus::Pending,
    };
    let pickup_location = fields.next().unwrap_or_default();
    Some(LicenseDraft {
        full_name: full_name.to_string(),
        license_plate: license_plate.to_string(),
        status,
        pickup_location: pickup_location.to_string(),
    })
}

// 允许葡语写法；其余取值整行拒绝
fn parse_status(raw: &str) -> Option<LicenseStatus> {
    match raw.to_lowercase().as_str() {
        "ready" | "pronto" | "pronta" | "disponível" | "disponivel" => Some(LicenseStatus::Ready),
        "pending" | "pendente" | "em processamento" => Some(LicenseStatus::Pending),
        _ => None,
    }
}

/// 解析并批量写入；没有合法行时不发请求
pub async fn import_licenses<R: Repository<License> + ?Sized>(
    repo: &R,
    text: &str,
) -> BackendResult<ImportReport> {
    let report = parse_license_lines(text);
    if !report.accepted.is_empty() {
        repo.create_many(&report.accepted)
            .await
            .map_err(|e| e.in_op("licenses.import"))?;
    }
    Ok(report)
}
