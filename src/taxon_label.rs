// 系統樹ラベル中の学名の解析と装飾
//
// ラベルは "属名 [sp|cf|aff] [種小名] [標本番号]" を含む自由なテキストとして扱う．
// 解析は失敗しない：学名として読めない部分はすべて通常のテキストになる．
// - 属名は大文字で始まる 4 文字以上の単語で，後ろに空白が続くもの
// - "type" を含む単語 (holotype, paratype 等) は学名の一部とみなさず太字にする

pub mod genus;
pub mod run;
pub mod styler;
pub mod tokenizer;
pub mod type_word;
