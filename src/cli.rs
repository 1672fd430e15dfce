use clap::{Parser, Subcommand};
use plant_ai_common::{QuestionSource, Variant};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-ai")]
#[command(about = "植物写真AI解析ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 植物の写真を解析して説明と抽出フィールドを出力
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// プロンプトのバリアント (overview/care-sheet/explorer)
        #[arg(long)]
        variant: Option<Variant>,

        /// 関連質問の取得方法 (none/marker/follow-up)
        #[arg(long)]
        questions: Option<QuestionSource>,

        /// プロンプトを直接指定（バリアントの文面を置き換える）
        #[arg(long)]
        prompt: Option<String>,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// PDFの出力先
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// PDFにnormalize済みテキストを出力
        #[arg(long)]
        normalized: bool,

        /// 解析後に関連質問を選んで続けて質問する
        #[arg(short, long)]
        interactive: bool,
    },

    /// 写真について質問する
    Ask {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 質問
        #[arg(required = true)]
        question: String,

        /// PDFの出力先
        #[arg(long)]
        pdf: Option<PathBuf>,
    },

    /// 解析結果JSONからPDFを生成
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力PDF（省略時は入力と同じフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ドキュメントタイトル
        #[arg(short, long)]
        title: Option<String>,

        /// normalize済みテキストを出力
        #[arg(long)]
        normalized: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
