// ==========================================
// TalentoPlus 人事管理系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 约定: 第 1 行为表头；返回第 2 行起的所有物理行（含空白行）
// ==========================================

use crate::domain::import::{RawEmployeeRow, SourceFormat, EMPLOYEE_COLUMN_COUNT, HEADER_ROW_NUMBER};
use crate::importer::employee_importer_trait::{FileParser, SheetRows};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Duration, NaiveDate};
use csv::{Position, ReaderBuilder, StringRecord};
use std::io::Cursor;
use std::path::Path;

// ==========================================
// 单元格文本化
// ==========================================

/// Excel 序列日期基准（1900 日期系统）
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Excel 序列值 -> YYYY-MM-DD
fn excel_serial_to_iso(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let date = excel_epoch()?.checked_add_signed(Duration::days(serial.floor() as i64))?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// 整数值浮点数不带 ".0"（证件号、电话常被 Excel 存为数字）
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// 单元格 -> 去空白文本
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) => format_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_iso(dt.as_f64()).unwrap_or_default(),
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<SheetRows> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 只读取第一个工作表
        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            return Ok(SheetRows::NoWorksheet);
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 绝对坐标读取：区域可能不从 A1 开始
        let Some((end_row, end_col)) = range.end() else {
            return Ok(SheetRows::Rows(Vec::new()));
        };
        let last_col = (end_col as usize).max(EMPLOYEE_COLUMN_COUNT - 1);

        let mut rows = Vec::with_capacity(end_row as usize);
        for r in (HEADER_ROW_NUMBER as u32)..=end_row {
            let cells = (0..=last_col)
                .map(|c| {
                    range
                        .get_value((r, c as u32))
                        .map(cell_text)
                        .unwrap_or_default()
                })
                .collect();
            rows.push(RawEmployeeRow::new(r as usize + 1, cells));
        }

        tracing::debug!(sheet = %sheet_name, rows = rows.len(), "Excel 工作表解析完成");
        Ok(SheetRows::Rows(rows))
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 定位记录的物理行号，返回 (行号, 其前被跳过的空行数)
    ///
    /// csv 读取器会静默丢弃空行，读取前的位置仍指向第一个空行；
    /// 以 CRLF 结尾的上一条记录会留下未消费的 LF
    fn locate_record(bytes: &[u8], from: &Position) -> (usize, usize) {
        let mut offset = from.byte() as usize;
        let mut line = from.line() as usize;
        if offset > 0 && bytes.get(offset - 1) == Some(&b'\r') && bytes.get(offset) == Some(&b'\n') {
            offset += 1;
            line += 1;
        }

        let blank_lines = bytes
            .get(offset..)
            .unwrap_or_default()
            .iter()
            .take_while(|b| matches!(b, b'\r' | b'\n'))
            .filter(|&&b| b == b'\n')
            .count();
        (line + blank_lines, blank_lines)
    }
}

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<SheetRows> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        let mut header_seen = false;
        loop {
            let start = reader.position().clone();
            if !reader.read_record(&mut record)? {
                break;
            }

            let (row_number, blank_lines) = Self::locate_record(bytes, &start);

            if !header_seen {
                header_seen = true;
                continue;
            }

            // 中间空行保留为空白行，参与计数与校验
            for blank in (row_number - blank_lines)..row_number {
                rows.push(RawEmployeeRow::new(blank, Vec::new()));
            }

            let cells = record.iter().map(|v| v.trim().to_string()).collect();
            rows.push(RawEmployeeRow::new(row_number, cells));
        }

        Ok(SheetRows::Rows(rows))
    }
}

// ==========================================
// 通用文件解析器（根据格式自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 按格式选择解析器
    pub fn parser_for(format: SourceFormat) -> Box<dyn FileParser> {
        match format {
            SourceFormat::Xlsx => Box::new(ExcelParser),
            SourceFormat::Csv => Box::new(CsvParser),
        }
    }

    /// 根据扩展名判断格式
    pub fn detect_format(file_path: &Path) -> ImportResult<SourceFormat> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        SourceFormat::from_extension(&ext).ok_or(ImportError::UnsupportedFormat(ext))
    }

    /// 读取文件字节并判断格式
    pub fn read_source(file_path: &Path) -> ImportResult<(Vec<u8>, SourceFormat)> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        let format = Self::detect_format(file_path)?;
        let bytes = std::fs::read(file_path)?;
        Ok((bytes, format))
    }

    pub fn parse(&self, bytes: &[u8], format: SourceFormat) -> ImportResult<SheetRows> {
        Self::parser_for(format).parse_bytes(bytes)
    }
}
