//! AST scan that keeps scripts inside the capability surface.
//!
//! The engine context already omits most dangerous commands, so they fail at
//! parse time. This pass catches what the parser accepts anyway: external
//! calls, redirections, globs, and any blocked declaration that might be
//! reachable under another spelling.

use std::collections::HashSet;

use nu_protocol::BlockId;
use nu_protocol::ast::{Argument, Block, Call, Expr, Expression, ListItem, RecordItem};
use nu_protocol::engine::StateWorkingSet;

use crate::ScriptError;

/// Rejects the first sandbox violation in `root` or any block it introduced.
pub fn ensure_sandboxed(
	working_set: &StateWorkingSet<'_>,
	root: &Block,
) -> Result<(), ScriptError> {
	let mut scan = Scan {
		working_set,
		visited: HashSet::new(),
	};
	scan.block(root)?;

	let base = working_set.permanent_state.num_blocks();
	for idx in 0..working_set.delta.blocks.len() {
		scan.block_id(BlockId::new(base + idx))?;
	}
	Ok(())
}

struct Scan<'a, 'ws> {
	working_set: &'a StateWorkingSet<'ws>,
	visited: HashSet<BlockId>,
}

impl Scan<'_, '_> {
	fn block_id(&mut self, id: BlockId) -> Result<(), ScriptError> {
		if !self.visited.insert(id) {
			return Ok(());
		}
		let block = self.working_set.get_block(id);
		self.block(block)
	}

	fn block(&mut self, block: &Block) -> Result<(), ScriptError> {
		for pipeline in &block.pipelines {
			for element in &pipeline.elements {
				if element.redirection.is_some() {
					return Err(deny("redirection"));
				}
				self.expr(&element.expr)?;
			}
		}
		Ok(())
	}

	fn call(&mut self, call: &Call) -> Result<(), ScriptError> {
		let name = self.working_set.get_decl(call.decl_id).name();
		if let Some(reason) = blocked_decl_reason(name) {
			return Err(ScriptError::Sandbox(format!("'{name}' ({reason})")));
		}
		for arg in &call.arguments {
			match arg {
				Argument::Positional(expr) | Argument::Unknown(expr) | Argument::Spread(expr) => {
					self.expr(expr)?
				}
				Argument::Named((_, _, Some(expr))) => self.expr(expr)?,
				Argument::Named(_) => {}
			}
		}
		for expr in call.parser_info.values() {
			self.expr(expr)?;
		}
		Ok(())
	}

	fn expr(&mut self, expression: &Expression) -> Result<(), ScriptError> {
		match &expression.expr {
			Expr::ExternalCall(..) => Err(deny("external commands")),
			Expr::GlobPattern(..) | Expr::GlobInterpolation(..) => Err(deny("glob expansion")),
			Expr::Call(call) => self.call(call),

			Expr::Subexpression(id)
			| Expr::Block(id)
			| Expr::Closure(id)
			| Expr::RowCondition(id) => self.block_id(*id),

			Expr::UnaryNot(inner) | Expr::Collect(_, inner) => self.expr(inner),
			Expr::Keyword(kw) => self.expr(&kw.expr),
			Expr::ValueWithUnit(vu) => self.expr(&vu.expr),
			Expr::FullCellPath(path) => self.expr(&path.head),
			Expr::BinaryOp(lhs, op, rhs) => {
				self.expr(lhs)?;
				self.expr(op)?;
				self.expr(rhs)
			}
			Expr::AttributeBlock(ab) => {
				for attr in &ab.attributes {
					self.expr(&attr.expr)?;
				}
				self.expr(&ab.item)
			}
			Expr::MatchBlock(cases) => cases.iter().try_for_each(|(_, arm)| self.expr(arm)),
			Expr::StringInterpolation(items) => items.iter().try_for_each(|item| self.expr(item)),
			Expr::List(items) => items.iter().try_for_each(|item| match item {
				ListItem::Item(expr) | ListItem::Spread(_, expr) => self.expr(expr),
			}),
			Expr::Record(items) => items.iter().try_for_each(|item| match item {
				RecordItem::Pair(key, value) => {
					self.expr(key)?;
					self.expr(value)
				}
				RecordItem::Spread(_, value) => self.expr(value),
			}),
			Expr::Range(range) => [&range.from, &range.next, &range.to]
				.into_iter()
				.flatten()
				.try_for_each(|bound| self.expr(bound)),
			Expr::Table(table) => {
				table.columns.iter().try_for_each(|col| self.expr(col))?;
				table.rows.iter().flat_map(|row| row.iter()).try_for_each(|cell| self.expr(cell))
			}
			_ => Ok(()),
		}
	}
}

fn deny(what: &str) -> ScriptError {
	ScriptError::Sandbox(format!("{what} are disabled"))
}

fn blocked_decl_reason(decl_name: &str) -> Option<&'static str> {
	match decl_name.to_ascii_lowercase().as_str() {
		"run-external" | "exec" | "bash" | "sh" | "nu" | "cmd" | "powershell" | "pwsh" => {
			Some("process execution is disabled")
		}
		"use" | "export use" | "source" | "source-env" | "overlay use" | "overlay new"
		| "overlay hide" => Some("module loading is disabled"),
		"for" | "while" | "loop" => Some("loops are disabled; use each"),
		"open" | "save" | "rm" | "mv" | "cp" | "mkdir" | "ls" | "cd" | "glob" => {
			Some("filesystem access is disabled")
		}
		"http" | "http get" | "http post" | "curl" | "wget" => Some("network access is disabled"),
		"plugin" | "plugin use" | "plugin add" | "register" => Some("plugins are disabled"),
		_ => None,
	}
}
